use jenga::config::{ENV_BRICK_MASS, ENV_GROUND_TEXTURE, ENV_LAYERS};
use jenga::JengaConfig;
use std::collections::HashMap;
use std::path::PathBuf;

fn overrides(pairs: &[(&str, &str)]) -> JengaConfig {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    JengaConfig::default().with_overrides(|key| values.get(key).cloned())
}

#[test]
fn defaults_describe_the_classic_tower() {
    let config = JengaConfig::default();
    assert_eq!(config.tower.layers, 18);
    assert_eq!(config.tower.brick_mass, 0.5);
    assert_eq!(config.physics.max_sub_steps, 10);
    assert_eq!(config.physics.slow_motion_dilation, 10.0);
    assert_eq!(config.ground.position.y, -0.5);
    assert_eq!(
        config.ground.texture,
        Some(PathBuf::from("assets/textures/grid.png"))
    );
}

#[test]
fn valid_overrides_are_applied() {
    let config = overrides(&[
        (ENV_LAYERS, "4"),
        (ENV_BRICK_MASS, " 2.5 "),
        (ENV_GROUND_TEXTURE, "other.png"),
    ]);

    assert_eq!(config.tower.layers, 4);
    assert_eq!(config.tower.brick_mass, 2.5);
    assert_eq!(config.ground.texture, Some(PathBuf::from("other.png")));
}

#[test]
fn unparsable_overrides_keep_defaults() {
    let config = overrides(&[(ENV_LAYERS, "many"), (ENV_BRICK_MASS, "")]);
    assert_eq!(config, JengaConfig::default());
}

#[test]
fn non_positive_brick_mass_is_ignored() {
    for mass in ["0", "-1", "-0.0", "NaN", "inf"] {
        let config = overrides(&[(ENV_BRICK_MASS, mass)]);
        assert_eq!(config.tower.brick_mass, 0.5, "override {mass:?}");
    }
}

#[test]
fn empty_texture_override_disables_the_texture() {
    let config = overrides(&[(ENV_GROUND_TEXTURE, "")]);
    assert_eq!(config.ground.texture, None);
}
