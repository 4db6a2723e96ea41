use super::element::Element;
use crate::error::{Error, Result};
use log::warn;
use std::{fmt::Display, str::FromStr};

const EXTENSION_ELEMENTS: &str = "extensionElements";

/// Values that can stand in for a boolean flag.
///
/// Only the exact string `"true"` and the boolean `true` count as set. Anything else,
/// `"True"` and numbers included, is unset.
pub trait Flag {
    fn is_set(&self) -> bool;
}

impl Flag for str {
    fn is_set(&self) -> bool {
        self == "true"
    }
}

impl Flag for String {
    fn is_set(&self) -> bool {
        self.as_str().is_set()
    }
}

impl Flag for bool {
    fn is_set(&self) -> bool {
        *self
    }
}

impl<T: Flag + ?Sized> Flag for &T {
    fn is_set(&self) -> bool {
        (**self).is_set()
    }
}

impl<T: Flag> Flag for Option<T> {
    fn is_set(&self) -> bool {
        self.as_ref().is_some_and(Flag::is_set)
    }
}

macro_rules! never_set {
    ($($ty:ty),*) => {$(
        impl Flag for $ty {
            fn is_set(&self) -> bool {
                false
            }
        }
    )*};
}

never_set!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, ());

/// Case sensitive, total boolean decode.
pub fn boolean_from_string(value: impl Flag) -> bool {
    value.is_set()
}

/// Reads the extension vocabulary attached to BPMN elements.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Extension<'a> {
    namespace: &'a str,
}

impl<'a> Extension<'a> {
    pub(crate) fn new(namespace: &'a str) -> Self {
        Self { namespace }
    }

    pub(crate) fn attr<'e>(&self, element: &'e Element, name: &str) -> Option<&'e str> {
        element.ns_attr(self.namespace, name)
    }

    pub(crate) fn string(&self, element: &Element, name: &str) -> String {
        self.attr(element, name).unwrap_or_default().to_string()
    }

    pub(crate) fn flag(&self, element: &Element, name: &str) -> bool {
        boolean_from_string(self.attr(element, name))
    }

    /// Extension elements named `name` inside the element's `<extensionElements>`.
    pub(crate) fn elements<'e>(
        &self,
        element: &'e Element,
        name: &'e str,
    ) -> impl Iterator<Item = &'e Element> {
        let namespace = self.namespace;
        element
            .bpmn_children(EXTENSION_ELEMENTS)
            .flat_map(|e| e.children.iter())
            .filter(move |e| e.is(namespace, name))
    }

    pub(crate) fn element<'e>(&self, element: &'e Element, name: &'e str) -> Option<&'e Element> {
        self.elements(element, name).next()
    }

    /// Every extension element named `name` anywhere below `root`, in document order.
    pub(crate) fn descendants<'e>(
        &self,
        root: &'e Element,
        name: &'e str,
    ) -> impl Iterator<Item = &'e Element> {
        let namespace = self.namespace;
        root.descendants()
            .filter(|e| e.is_bpmn(EXTENSION_ELEMENTS))
            .flat_map(|e| e.children.iter())
            .filter(move |e| e.is(namespace, name))
    }

    /// Decode a numeric code. Absent is `None`; unknown or non-numeric decodes to the
    /// default variant.
    pub(crate) fn code<T>(&self, element: &Element, name: &str) -> Option<T>
    where
        T: TryFrom<u8> + Default + Display,
    {
        self.attr(element, name).map(|raw| decode_code(element, name, raw))
    }
}

pub(crate) fn decode_code<T>(element: &Element, name: &str, raw: &str) -> T
where
    T: TryFrom<u8> + Default + Display,
{
    match raw.trim().parse::<u8>().ok().map(T::try_from) {
        Some(Ok(value)) => value,
        _ => {
            let fallback = T::default();
            warn!("{element}: unknown {name} {raw:?}, using {fallback}");
            fallback
        }
    }
}

/// Strict numeric decode for values the model cannot do without.
pub(crate) fn parse_number<T: FromStr>(field: impl Into<String>, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidNumber {
        field: field.into(),
        value: raw.into(),
    })
}
