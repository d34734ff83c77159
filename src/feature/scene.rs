// hdn-make: Hedron build configuration generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scene and light configuration capabilities of the client asset packs.
//!
//! ```text
//! scene_config v1  SceneConfigAsset0   no proxy geometry, light: LightConfigAsset2
//! light_config v1  LightConfigAsset2
//! ```

use super::{Capability, Feature, FeatureRegistry};
use crate::error::FeatureError;

/// Light budget of a scene.
pub trait LightConfig {
    fn max_primary_light_count(&self) -> u32;
    fn max_secondary_light_count(&self) -> u32;
}

/// Scene-wide settings selected per asset pack.
pub trait SceneConfig {
    fn should_generate_proxy_geo(&self) -> bool;
    fn light_config(&self) -> Box<dyn LightConfig>;
}

/// The `scene_config` capability.
pub struct SceneConfigs;

impl Capability for SceneConfigs {
    const NAME: &'static str = "scene_config";
    type Object = dyn SceneConfig;
}

/// The `light_config` capability.
pub struct LightConfigs;

impl Capability for LightConfigs {
    const NAME: &'static str = "light_config";
    type Object = dyn LightConfig;
}

/// Light configuration shipped with asset pack 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightConfigAsset2;

impl LightConfig for LightConfigAsset2 {
    fn max_primary_light_count(&self) -> u32 {
        1
    }

    fn max_secondary_light_count(&self) -> u32 {
        8
    }
}

impl Feature<LightConfigs> for LightConfigAsset2 {
    const VERSION: u32 = 1;

    fn create() -> Box<dyn LightConfig> {
        Box::new(Self)
    }
}

/// Scene configuration shipped with asset pack 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneConfigAsset0;

impl SceneConfig for SceneConfigAsset0 {
    fn should_generate_proxy_geo(&self) -> bool {
        false
    }

    fn light_config(&self) -> Box<dyn LightConfig> {
        Box::new(LightConfigAsset2)
    }
}

impl Feature<SceneConfigs> for SceneConfigAsset0 {
    const VERSION: u32 = 1;

    fn create() -> Box<dyn SceneConfig> {
        Box::new(Self)
    }
}

/// Registers the builtin scene and light configurations.
///
/// # Errors
///
/// Returns `FeatureError::DuplicateVersion` if `registry` already holds a
/// different implementation at one of the builtin versions.
pub fn register_builtin(registry: &mut FeatureRegistry) -> Result<(), FeatureError> {
    registry.register::<LightConfigs, LightConfigAsset2>()?;
    registry.register::<SceneConfigs, SceneConfigAsset0>()?;
    Ok(())
}
