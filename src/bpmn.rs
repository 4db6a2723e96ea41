//! Numeric codes carried by the extension attributes.
//!
//! Every table serializes as its number, so a parsed model keeps the exact wire values the
//! execution engine expects.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u8", try_from = "u8")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $label),)+
                }
            }
        }
    };
}

numeric_enum! {
    #[derive(Default)]
    ActivityType {
        #[default]
        Task = 0 => "Task",
        SubProcess = 1 => "SubProcess",
    }
}

numeric_enum! {
    #[derive(Default)]
    TaskType {
        #[default]
        None = 0 => "None",
        User = 1 => "User",
        Service = 2 => "Service",
        Send = 3 => "Send",
    }
}

numeric_enum! {
    /// Completion semantics of an activity.
    #[derive(Default)]
    Behavior {
        /// Complete as soon as the activity has run.
        #[default]
        Continue = 0 => "Continue",
        /// Wait until the activity is signaled as complete.
        Block = 1 => "Block",
    }
}

numeric_enum! {
    #[derive(Default)]
    Direction {
        #[default]
        In = 0 => "In",
        Out = 1 => "Out",
    }
}

numeric_enum! {
    #[derive(Default)]
    GatewayType {
        /// Exactly one outgoing flow is taken.
        #[default]
        Xor = 0 => "XOR",
        /// All outgoing flows are taken.
        And = 2 => "AND",
    }
}

numeric_enum! {
    #[derive(Default)]
    EventType {
        #[default]
        TimerDate = 0 => "TimerDate",
        TimerDuration = 1 => "TimerDuration",
    }
}

numeric_enum! {
    #[derive(Default)]
    EventBehavior {
        /// Cancel the activity the event is attached to.
        #[default]
        Interrupting = 0 => "Interrupting",
        /// Let the process continue alongside the event.
        Continue = 1 => "Continue",
    }
}

numeric_enum! {
    /// Comparison operator of a transition condition.
    #[derive(Default)]
    Operator {
        Eq = 0 => "==",
        Lt = 1 => "<",
        Gt = 2 => ">",
        Lte = 3 => "<=",
        Gte = 4 => ">=",
        Neq = 5 => "!=",
        #[default]
        Unspecified = 255 => "unspecified",
    }
}

numeric_enum! {
    /// Data type of the right hand value of a transition condition.
    #[derive(Default)]
    DataType {
        #[default]
        Unspecified = 0 => "unspecified",
        Bool = 1 => "bool",
        String = 2 => "string",
        Uint = 8 => "uint",
        Int = 18 => "int",
        Address = 40 => "address",
        Bytes32 = 59 => "bytes32",
    }
}

numeric_enum! {
    /// Semantic type of a data store field.
    ParameterType {
        Boolean = 0 => "Boolean",
        String = 1 => "String",
        Number = 2 => "Number",
        Date = 3 => "Date",
        Datetime = 4 => "Datetime",
        MonetaryAmount = 5 => "MonetaryAmount",
        UserOrganization = 6 => "UserOrganization",
        ContractAddress = 7 => "ContractAddress",
        SigningParty = 8 => "SigningParty",
        Bytes32 = 9 => "Bytes32",
        Document = 10 => "Document",
        LargeText = 11 => "LargeText",
        PositiveNumber = 12 => "PositiveNumber",
    }
}
