use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starfield_core::{FrameReport, MotionController, StarField, StarSprite, StarfieldConfig};

use crate::constants::{color_from_hex, Colors, DRIFT_CHECK_INTERVAL};

use super::core::{SceneState, StarfieldSettings};
use super::{StartupSet, UpdateSet};

const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

pub struct StarfieldPlugin;

/// The motion loop: star buffer plus scroll boost.
#[derive(Resource)]
pub(crate) struct StarMotion(pub(crate) MotionController);

#[derive(Resource)]
struct StarfieldMesh {
    mesh: Handle<Mesh>,
    half_size: f32,
    last_report: Option<FrameReport>,
}

#[derive(Component)]
struct StarfieldPoints;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_starfield.in_set(StartupSet::Spawn))
            .add_systems(
                Update,
                advance_stars
                    .in_set(UpdateSet::Motion)
                    .run_if(resource_exists::<StarMotion>),
            )
            .add_systems(
                Update,
                upload_star_positions
                    .in_set(UpdateSet::Visuals)
                    .run_if(resource_exists::<StarMotion>),
            );
    }
}

fn spawn_starfield(
    mut commands: Commands,
    settings: Res<StarfieldSettings>,
    scene: Option<Res<SceneState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(scene) = scene else {
        return;
    };
    let config = &settings.0;
    let count = config.profile(scene.0.device).star_count;

    let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
    let field = StarField::generate(config, count, &mut rng);
    let half_size = star_half_size(config);

    let sprite = StarSprite::radial(config.sprite_size);
    let texture = images.add(sprite_image(sprite));

    let material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::STAR),
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    let mesh = meshes.add(build_star_mesh(&field, half_size));

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        StarfieldPoints,
    ));

    info!("Spawned {} stars", field.len());

    commands.insert_resource(StarfieldMesh {
        mesh,
        half_size,
        last_report: None,
    });
    commands.insert_resource(StarMotion(MotionController::new(
        config,
        scene.0.device,
        field,
    )));
}

fn star_half_size(config: &StarfieldConfig) -> f32 {
    config.star_quad_size() * 0.5
}

fn sprite_image(sprite: StarSprite) -> Image {
    Image::new(
        Extent3d {
            width: sprite.size,
            height: sprite.size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        sprite.rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// One camera-facing quad per star. Positions are rewritten every frame;
/// normals, UVs and indices never change.
fn build_star_mesh(field: &StarField, half_size: f32) -> Mesh {
    let count = field.len();
    let mut positions = vec![[0.0; 3]; count * 4];
    write_quad_positions(field.positions(), half_size, &mut positions);

    let normals = vec![[0.0, 0.0, 1.0]; count * 4];
    let uvs: Vec<[f32; 2]> = (0..count).flat_map(|_| QUAD_UVS).collect();
    let indices: Vec<u32> = (0..count as u32)
        .flat_map(|i| {
            let base = i * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Expand flat `[x, y, z]` star centres into quad corners in the XY plane.
fn write_quad_positions(centres: &[f32], half_size: f32, out: &mut [[f32; 3]]) {
    for (centre, quad) in centres.chunks_exact(3).zip(out.chunks_exact_mut(4)) {
        for (corner, offset) in quad.iter_mut().zip(QUAD_CORNERS) {
            *corner = [
                centre[0] + offset[0] * half_size,
                centre[1] + offset[1] * half_size,
                centre[2],
            ];
        }
    }
}

fn advance_stars(
    time: Res<Time>,
    mut motion: ResMut<StarMotion>,
    mut star_mesh: ResMut<StarfieldMesh>,
    mut drift_reported: Local<bool>,
) {
    let report = motion.0.tick(time.delta_secs_f64());

    if !*drift_reported && report.frame % DRIFT_CHECK_INTERVAL == 0 {
        let overflow = motion.0.field().lateral_overflow();
        if overflow > 0 {
            warn!(
                "{} stars drifted outside the field after {} frames",
                overflow, report.frame
            );
            *drift_reported = true;
        }
    }

    star_mesh.last_report = Some(report);
}

fn upload_star_positions(
    motion: Res<StarMotion>,
    star_mesh: Res<StarfieldMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let dirty = star_mesh
        .last_report
        .is_some_and(|report| report.positions_dirty);
    if !dirty {
        return;
    }

    let Some(mesh) = meshes.get_mut(&star_mesh.mesh) else {
        return;
    };
    if let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    {
        write_quad_positions(motion.0.field().positions(), star_mesh.half_size, positions);
    }
}
