//! Cache config driven by loaded settings

use std::marker::PhantomData;
use std::time::Duration;

use crate::config::CacheSettings;
use crate::domain::cache::{CacheConfig, ServerPairings, downcast_storable, identity_key};
use crate::domain::error::{CacheError, CacheResult};
use crate::domain::storable::{FieldRef, StorableObject};

/// Deployment config built from the `cache` settings section
///
/// Keys objects of type `O` only, so a prefix never spans two types. The
/// key is `<key_prefix>-<value>` of the scalar field named by `key_field`.
#[derive(Debug)]
pub struct SettingsConfig<O: StorableObject> {
    key_prefix: String,
    key_field: String,
    ttl: Duration,
    pairings: ServerPairings,
    allow_key_override: bool,
    allow_non_expiring_keys: bool,
    allow_ttl_override: bool,
    object: PhantomData<fn() -> O>,
}

impl<O: StorableObject> Clone for SettingsConfig<O> {
    fn clone(&self) -> Self {
        Self {
            key_prefix: self.key_prefix.clone(),
            key_field: self.key_field.clone(),
            ttl: self.ttl,
            pairings: self.pairings.clone(),
            allow_key_override: self.allow_key_override,
            allow_non_expiring_keys: self.allow_non_expiring_keys,
            allow_ttl_override: self.allow_ttl_override,
            object: PhantomData,
        }
    }
}

impl<O: StorableObject> SettingsConfig<O> {
    pub fn from_settings(settings: &CacheSettings) -> CacheResult<Self> {
        Ok(Self {
            key_prefix: settings.key_prefix.clone(),
            key_field: settings.key_field.clone(),
            ttl: Duration::from_secs(settings.ttl_secs),
            pairings: settings.server_pairings()?,
            allow_key_override: settings.allow_key_override,
            allow_non_expiring_keys: settings.allow_non_expiring_keys,
            allow_ttl_override: settings.allow_ttl_override,
            object: PhantomData,
        })
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }
}

impl<O: StorableObject> CacheConfig for SettingsConfig<O> {
    fn name(&self) -> &str {
        &self.key_prefix
    }

    fn server_pairings(&self) -> &ServerPairings {
        &self.pairings
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn cache_allows_key_override(&self) -> bool {
        self.allow_key_override
    }

    fn cache_allows_non_expiring_keys(&self) -> bool {
        self.allow_non_expiring_keys
    }

    fn cache_allows_ttl_override(&self) -> bool {
        self.allow_ttl_override
    }

    fn create_key_from_storable_object(&self, obj: &dyn StorableObject) -> CacheResult<String> {
        let obj = downcast_storable::<O>(obj)?;

        let item = obj
            .items()
            .into_iter()
            .find(|item| item.name == Some(self.key_field.as_str()))
            .ok_or_else(|| {
                CacheError::invalid_object_for_key(format!(
                    "{} has no field named {}",
                    obj.type_name(),
                    self.key_field
                ))
            })?;

        match item.field {
            FieldRef::Value(identity) => identity_key(&self.key_prefix, &self.key_field, identity),
            FieldRef::Object(_) => Err(CacheError::invalid_object_for_key(format!(
                "{} must be a scalar to build a key obj={}",
                self.key_field,
                obj.type_name()
            ))),
        }
    }
}
