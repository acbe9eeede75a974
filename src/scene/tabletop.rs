//! The authored tabletop: a wooden table against a wall, a roll of masking
//! tape, a small glass bottle, a perfume bottle and a console dock.
//!
//! All placement is literal. Parts of one object share an offset vector so the
//! whole object can be moved by changing a single constant.

use cgmath::Vector3;

use crate::{
    backend::{BoxSide, Draw, Shape},
    data_structures::{
        light::{DirectionalLight, Lighting, PointLight},
        material::Material,
        transform::Transform,
    },
    render::{DrawStep, SceneObject},
};

use super::TextureSource;

const LIGHT_BLUE: [f32; 3] = [0.57, 0.70, 1.00];

pub fn textures() -> Vec<TextureSource> {
    [
        ("woodTableTexture.jpg", "table"),
        ("wallTexture.png", "wall"),
        ("maskingTapeTexture.png", "maskingTape"),
        ("smallBottleCapTexture.jpg", "smallBottleCap"),
        ("perfumeBottleTexture.jpg", "perfumeBottleBase"),
        ("perfumeBottleBaseText.png", "perfumeBottleBaseText"),
        ("perfumeBottleCapTexture.png", "perfumeBottleCap"),
        ("switchDockFrontText.png", "switchDockFrontText"),
        ("switchDockTexture.png", "switchDock"),
    ]
    .into_iter()
    .map(|(file, tag)| TextureSource::new(file, tag))
    .collect()
}

pub fn materials() -> Vec<Material> {
    vec![
        Material::new("table")
            .with_ambient([0.7, 0.7, 0.7], 0.35)
            .with_diffuse([0.5, 0.5, 0.5])
            .with_specular([0.25, 0.25, 0.25], 0.5),
        Material::new("backwall")
            .with_ambient([0.6, 0.6, 0.6], 0.35)
            .with_diffuse([0.4, 0.4, 0.4])
            .with_specular([0.0, 0.0, 0.0], 0.0),
        Material::new("glass")
            .with_ambient(LIGHT_BLUE, 0.4)
            .with_diffuse(LIGHT_BLUE)
            .with_specular([0.6, 0.6, 0.6], 32.0),
        Material::new("tape")
            .with_ambient([0.1, 0.1, 0.1], 0.2)
            .with_diffuse([0.5, 0.5, 0.5])
            .with_specular([0.1, 0.1, 0.1], 0.3),
        Material::new("perfumeBottle")
            .with_ambient([0.0, 0.0, 0.0], 0.1)
            .with_diffuse([0.1, 0.1, 0.1])
            .with_specular([0.0, 0.0, 0.0], 0.3),
        Material::new("copper")
            .with_ambient([0.2, 0.2, 0.2], 0.6)
            .with_diffuse([0.94, 0.47, 0.37])
            .with_specular([0.5, 0.5, 0.5], 32.0),
        Material::new("dock")
            .with_ambient([0.1, 0.1, 0.1], 0.1)
            .with_diffuse([0.1, 0.1, 0.1])
            .with_specular([0.4, 0.2, 0.2], 0.2),
    ]
}

/// A ceiling-like directional light plus one fill light in front of the table.
pub fn lighting() -> Lighting {
    Lighting {
        use_lighting: true,
        directional: DirectionalLight {
            direction: Vector3::new(0.0, 12.0, 10.0),
            ambient: Vector3::new(0.1, 0.1, 0.1),
            diffuse: Vector3::new(0.82, 0.93, 0.96),
            specular: Vector3::new(0.1, 0.1, 0.1),
            active: true,
        },
        point_lights: vec![PointLight {
            position: Vector3::new(0.0, 3.0, 8.0),
            ambient: Vector3::new(0.05, 0.05, 0.05),
            diffuse: Vector3::new(0.9, 0.9, 0.9),
            specular: Vector3::new(0.1, 0.1, 0.1),
            active: true,
        }],
    }
}

pub fn objects() -> Vec<SceneObject> {
    let small_bottle = Vector3::new(-3.25, 0.05, 2.5);
    let perfume_bottle = Vector3::new(-1.5, 0.05, 1.0);
    let dock = Vector3::new(2.5, 0.475, 1.0);

    vec![
        SceneObject::new(
            "table",
            Transform::scaled(20.0, 1.0, 5.0).at(0.0, 0.0, 5.0),
            vec![DrawStep::textured("table", Draw::Mesh(Shape::Plane)).with_material("table")],
        ),
        SceneObject::new(
            "backwall",
            Transform::scaled(20.0, 1.0, 10.0)
                .rotated(90.0, 0.0, 0.0)
                .at(0.0, 10.0, 0.0),
            vec![DrawStep::textured("wall", Draw::Mesh(Shape::Plane)).with_material("backwall")],
        ),
        // Leans back against the wall; keeps the wall's material.
        SceneObject::new(
            "masking tape",
            Transform::scaled(1.5, 3.0, 1.5)
                .rotated(-20.0, 0.0, 0.0)
                .at(-7.25, 3.37, 1.3),
            vec![DrawStep::textured("maskingTape", Draw::Mesh(Shape::Torus))],
        ),
        SceneObject::new(
            "small bottle base",
            Transform::scaled(0.25, 1.0, 0.25).offset_by(small_bottle),
            vec![
                DrawStep::colored([0.57, 0.70, 1.00, 0.25], Draw::Mesh(Shape::Cylinder))
                    .with_material("glass"),
            ],
        ),
        SceneObject::new(
            "small bottle neck",
            Transform::scaled(0.25, 0.3, 0.25)
                .at(0.0, 1.0, 0.0)
                .offset_by(small_bottle),
            vec![
                DrawStep::colored([0.57, 0.70, 1.00, 0.5], Draw::Mesh(Shape::TaperedCylinder))
                    .with_material("glass"),
            ],
        ),
        SceneObject::new(
            "small bottle cap",
            Transform::scaled(0.25, 0.2, 0.25)
                .at(0.0, 1.2, 0.0)
                .offset_by(small_bottle),
            vec![DrawStep::textured("smallBottleCap", Draw::Mesh(Shape::Cylinder))],
        ),
        // The label goes on the front face only, then the whole box is drawn.
        SceneObject::new(
            "perfume bottle base",
            Transform::scaled(2.0, 3.0, 0.75)
                .rotated(0.0, -15.0, 0.0)
                .at(0.0, 1.5, 0.0)
                .offset_by(perfume_bottle),
            vec![
                DrawStep::textured("perfumeBottleBaseText", Draw::BoxSide(BoxSide::Front)),
                DrawStep::textured("perfumeBottleBase", Draw::Mesh(Shape::Box))
                    .with_material("perfumeBottle"),
            ],
        ),
        SceneObject::new(
            "perfume bottle cap",
            Transform::scaled(0.4, 0.3, 0.3)
                .at(0.0, 3.0, 0.0)
                .offset_by(perfume_bottle),
            vec![DrawStep::textured("perfumeBottleCap", Draw::Mesh(Shape::Cylinder)).with_material("copper")],
        ),
        SceneObject::new(
            "dock front",
            Transform::scaled(5.0, 3.75, 0.15)
                .rotated(0.0, -20.0, 0.0)
                .at(0.0, 1.4, 1.0)
                .offset_by(dock),
            vec![
                DrawStep::textured("switchDockFrontText", Draw::BoxSide(BoxSide::Front)),
                DrawStep::textured("switchDock", Draw::Mesh(Shape::Box)).with_material("dock"),
            ],
        ),
        SceneObject::new(
            "dock middle",
            Transform::scaled(5.0, 1.0, 0.4)
                .rotated(0.0, -20.0, 0.0)
                .at(0.095, 0.03, 0.75)
                .offset_by(dock),
            vec![DrawStep::textured("switchDock", Draw::Mesh(Shape::Box)).with_material("dock")],
        ),
        SceneObject::new(
            "dock back",
            Transform::scaled(5.0, 3.75, 0.75)
                .rotated(0.0, -20.0, 0.0)
                .at(0.25, 1.4, 0.3)
                .offset_by(dock),
            vec![DrawStep::textured("switchDock", Draw::Mesh(Shape::Box)).with_material("dock")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_referenced_tag_is_defined() {
        let textures = textures();
        let materials = materials();
        for object in objects() {
            for step in &object.steps {
                if let crate::render::Surface::Texture(tag) = &step.surface {
                    assert!(
                        textures.iter().any(|t| &t.tag == tag),
                        "{}: texture {tag}",
                        object.name
                    );
                }
                if let Some(tag) = &step.material {
                    assert!(
                        materials.iter().any(|m| &m.tag == tag),
                        "{}: material {tag}",
                        object.name
                    );
                }
            }
        }
    }

    #[test]
    fn texture_count_fits_sixteen_units() {
        assert_eq!(textures().len(), 9);
        assert!(textures().len() <= 16);
    }
}
