// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feature tag registry.
//!
//! ```text
//! Capability  SceneConfigs  (NAME = "scene_config", Object = dyn SceneConfig)
//!     |
//!     +-- v1 --> SceneConfigAsset0::create
//!     +-- v2 --> ...
//!
//! register::<C, F>()      F: Feature<C>, keyed by (C, F::VERSION)
//! resolve::<C>(version)   exact version
//! resolve_latest::<C>()   highest version
//! ```
//!
//! Registering the same implementation at the same version twice is a
//! no-op. A different implementation at a taken version is rejected.

pub mod scene;

use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::FeatureError;

/// An abstract role with interchangeable implementations.
pub trait Capability: 'static {
    /// Stable name used in listings and errors.
    const NAME: &'static str;

    /// What implementations produce, usually a trait object.
    type Object: ?Sized + 'static;
}

/// A concrete, versioned implementation of capability `C`.
pub trait Feature<C: Capability>: 'static {
    const VERSION: u32;

    fn create() -> Box<C::Object>;
}

/// Last path segment of `T`'s name, without generic arguments.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let path = full.split_once('<').map_or(full, |(path, _)| path);
    path.rsplit("::").next().unwrap_or(path)
}

struct Registration {
    implementation: &'static str,
    type_id: TypeId,
    /// `fn() -> Box<C::Object>` for the slot's capability.
    factory: Box<dyn Any>,
}

struct CapabilitySlot {
    name: &'static str,
    versions: BTreeMap<u32, Registration>,
}

/// A resolved implementation of `C`.
pub struct Implementation<C: Capability> {
    implementation: &'static str,
    version: u32,
    factory: fn() -> Box<C::Object>,
}

impl<C: Capability> Implementation<C> {
    /// Short type name of the implementation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.implementation
    }

    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Instantiates the implementation.
    #[must_use]
    pub fn create(&self) -> Box<C::Object> {
        (self.factory)()
    }
}

impl<C: Capability> Clone for Implementation<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Capability> Copy for Implementation<C> {}

impl<C: Capability> std::fmt::Debug for Implementation<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Implementation")
            .field("capability", &C::NAME)
            .field("implementation", &self.implementation)
            .field("version", &self.version)
            .finish()
    }
}

/// One row of [`FeatureRegistry::entries`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeatureEntry {
    pub capability: &'static str,
    pub version: u32,
    pub implementation: &'static str,
}

impl std::fmt::Display for FeatureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} = {}", self.capability, self.version, self.implementation)
    }
}

/// Maps (capability, version) to an implementation factory.
#[derive(Default)]
pub struct FeatureRegistry {
    capabilities: BTreeMap<TypeId, CapabilitySlot>,
}

impl FeatureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `F` as the implementation of `C` at `F::VERSION`.
    ///
    /// Returns `Ok(false)` if exactly this implementation was already
    /// registered at this version.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::DuplicateVersion` if another implementation
    /// holds the version.
    pub fn register<C, F>(&mut self) -> Result<bool, FeatureError>
    where
        C: Capability,
        F: Feature<C>,
    {
        let implementation = short_type_name::<F>();
        let slot = self
            .capabilities
            .entry(TypeId::of::<C>())
            .or_insert_with(|| CapabilitySlot {
                name: C::NAME,
                versions: BTreeMap::new(),
            });

        if let Some(existing) = slot.versions.get(&F::VERSION) {
            if existing.type_id == TypeId::of::<F>() {
                debug!(capability = C::NAME, version = F::VERSION, implementation, "Feature already registered");
                return Ok(false);
            }
            return Err(FeatureError::DuplicateVersion {
                capability: C::NAME.to_string(),
                version: F::VERSION,
                existing: existing.implementation.to_string(),
                implementation: implementation.to_string(),
            });
        }

        let factory: fn() -> Box<C::Object> = F::create;
        slot.versions.insert(
            F::VERSION,
            Registration {
                implementation,
                type_id: TypeId::of::<F>(),
                factory: Box::new(factory),
            },
        );
        debug!(capability = C::NAME, version = F::VERSION, implementation, "Registered feature");
        Ok(true)
    }

    fn slot<C: Capability>(&self) -> Option<&CapabilitySlot> {
        self.capabilities.get(&TypeId::of::<C>())
    }

    fn implementation<C: Capability>(
        version: u32,
        registration: &Registration,
    ) -> Result<Implementation<C>, FeatureError> {
        let factory = registration
            .factory
            .downcast_ref::<fn() -> Box<C::Object>>()
            .copied()
            .ok_or_else(|| FeatureError::FactoryMismatch {
                capability: C::NAME.to_string(),
                version,
            })?;

        Ok(Implementation {
            implementation: registration.implementation,
            version,
            factory,
        })
    }

    /// Resolves the implementation of `C` registered at `version`.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::NoSuchVersion` if nothing is registered there.
    pub fn resolve<C: Capability>(&self, version: u32) -> Result<Implementation<C>, FeatureError> {
        let registration = self
            .slot::<C>()
            .and_then(|slot| slot.versions.get(&version))
            .ok_or_else(|| FeatureError::NoSuchVersion {
                capability: C::NAME.to_string(),
                version,
            })?;

        Self::implementation(version, registration)
    }

    /// Resolves the implementation of `C` with the highest version.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::EmptyCapability` if `C` has no implementation.
    pub fn resolve_latest<C: Capability>(&self) -> Result<Implementation<C>, FeatureError> {
        let (version, registration) = self
            .slot::<C>()
            .and_then(|slot| slot.versions.last_key_value())
            .ok_or_else(|| FeatureError::EmptyCapability(C::NAME.to_string()))?;

        Self::implementation(*version, registration)
    }

    /// Registered versions of `C`, ascending.
    #[must_use]
    pub fn versions<C: Capability>(&self) -> Vec<u32> {
        self.slot::<C>()
            .map(|slot| slot.versions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Every registration, sorted by capability name then version.
    #[must_use]
    pub fn entries(&self) -> Vec<FeatureEntry> {
        let mut entries: Vec<FeatureEntry> = self
            .capabilities
            .values()
            .flat_map(|slot| {
                slot.versions.iter().map(|(version, registration)| FeatureEntry {
                    capability: slot.name,
                    version: *version,
                    implementation: registration.implementation,
                })
            })
            .collect();
        entries.sort();
        entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl std::fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("entries", &self.entries())
            .finish_non_exhaustive()
    }
}
