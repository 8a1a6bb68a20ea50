//! Transport independent request handling.
//!
//! These functions implement the steps that every request
//! for a CRUD resource goes through, regardless of its type.

use super::{ApiError, Creator, Deleter, KeyFieldInfo, Keys, Params, Reader, Updater};

/// Parse all key fields of a resource from the request parameters.
pub fn keys_from_params(fields: &[KeyFieldInfo], params: &Params) -> Result<Keys, ApiError> {
    let mut keys = Keys::new();
    for info in fields {
        let raw = params
            .get(info.field)
            .ok_or_else(|| ApiError::bad_request(format!("missing key: {}", info.field)))?;
        let value = (info.func)(raw).map_err(|err| {
            ApiError::bad_request(format!("failed to parse key {}: {err}", info.field))
        })?;
        keys.insert(info.field.to_string(), value);
    }
    Ok(keys)
}

pub fn create_handler<T: Creator>(obj: &mut T) -> Result<(), ApiError> {
    obj.validate()?;
    obj.create()?;
    log::info!("Created {}: {}", obj.type_name(), obj.audit_name());
    Ok(())
}

pub fn read_handler<T: Reader>(obj: &T) -> Result<Vec<T::Record>, ApiError> {
    obj.read()
}

pub fn update_handler<T: Updater>(obj: &mut T, params: &Params) -> Result<(), ApiError> {
    let keys = keys_from_params(obj.key_fields_info(), params)?;
    obj.set_keys(&keys)?;
    obj.validate()?;
    obj.update()?;
    log::info!("Updated {}: {}", obj.type_name(), obj.audit_name());
    Ok(())
}

pub fn delete_handler<T: Deleter>(obj: &mut T, params: &Params) -> Result<(), ApiError> {
    let keys = keys_from_params(obj.key_fields_info(), params)?;
    obj.set_keys(&keys)?;
    obj.delete()?;
    log::info!("Deleted {}: {}", obj.type_name(), obj.audit_name());
    Ok(())
}
