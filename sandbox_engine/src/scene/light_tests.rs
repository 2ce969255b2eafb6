//! Unit tests for light.rs

use super::*;

#[test]
fn test_default_light_is_zeroed() {
    let light = Light::new();
    assert_eq!(light.ambient_color(), Vec4::ZERO);
    assert_eq!(light.direction(), Vec3::ZERO);
    assert_eq!(light.specular_power(), 0.0);
}

#[test]
fn test_properties_round_trip() {
    let value4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
    let value3 = Vec3::new(1.0, 2.0, 3.0);
    let mut light = Light::new();

    assert_ne!(light.ambient_color(), value4);
    light.set_ambient_color(value4);
    assert_eq!(light.ambient_color(), value4);

    assert_ne!(light.diffuse_color(), value4);
    light.set_diffuse_color(value4);
    assert_eq!(light.diffuse_color(), value4);

    assert_ne!(light.specular_color(), value4);
    light.set_specular_color(value4);
    assert_eq!(light.specular_color(), value4);

    assert_ne!(light.specular_power(), 42.0);
    light.set_specular_power(42.0);
    assert_eq!(light.specular_power(), 42.0);

    assert_ne!(light.direction(), value3);
    light.set_direction(value3);
    assert_eq!(light.direction(), value3);
}
