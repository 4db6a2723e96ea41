use crate::{
    bpmn::ParameterType,
    error::{Error, Result},
    model::{DataStoreField, Model, Version},
    reader::{Element, Extension},
};
use log::debug;

/// Model metadata lives on the collaboration, or on the definitions without one.
pub(super) fn extract(
    root: &Element,
    collaboration: Option<&Element>,
    ext: Extension<'_>,
) -> Result<Model> {
    let source = collaboration.unwrap_or(root);
    let id = ext
        .attr(source, "modelId")
        .or_else(|| source.id())
        .ok_or_else(|| Error::MissingAttribute {
            element: source.to_string(),
            attribute: "id",
        })?;
    let name = source.attr("name").or_else(|| source.id()).unwrap_or(id);
    let version = ext
        .attr(source, "version")
        .map(str::parse::<Version>)
        .transpose()?
        .unwrap_or_default();

    let data_store_fields = ext
        .descendants(root, "dataStoreField")
        .map(data_store_field)
        .collect::<Result<Vec<_>>>()?;

    Ok(Model {
        id: id.to_string(),
        name: name.to_string(),
        version,
        is_private: ext.flag(source, "private"),
        data_store_fields,
    })
}

fn data_store_field(element: &Element) -> Result<DataStoreField> {
    let non_empty = |attribute: &str| element.attr(attribute).filter(|v| !v.trim().is_empty());
    let data_storage_id = non_empty("dataStorageId")
        .ok_or_else(|| Error::InvalidDataStoreField("missing dataStorageId".into()))?;
    let data_path = non_empty("dataPath").ok_or_else(|| {
        Error::InvalidDataStoreField(format!("{data_storage_id}: missing dataPath"))
    })?;
    let raw = non_empty("parameterType").ok_or_else(|| {
        let field = format!("{data_storage_id}.{data_path}");
        Error::InvalidDataStoreField(format!("{field}: missing parameterType"))
    })?;
    let parameter_type = raw
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|code| ParameterType::try_from(code).ok())
        .ok_or_else(|| {
            Error::InvalidDataStoreField(format!(
                "{data_storage_id}.{data_path}: unknown parameterType {raw}"
            ))
        })?;
    debug!("data store field {data_storage_id}.{data_path}: {parameter_type}");
    Ok(DataStoreField {
        data_storage_id: data_storage_id.to_string(),
        data_path: data_path.to_string(),
        parameter_type,
    })
}
