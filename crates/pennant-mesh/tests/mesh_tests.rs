//! Integration tests for pennant-mesh.

use pennant_mesh::constraint::satisfy_pair;
use pennant_mesh::normals::compute_vertex_normals;
use pennant_mesh::{ClothMesh, Constraint, GridConfig, Particle, PlanePlacement, SurfaceMesh, Vec3};
use pennant_types::{ParticleId, PennantError};

fn at(point: Vec3) -> impl Fn(f32, f32) -> Vec3 {
    move |_, _| point
}

fn particle_at(point: Vec3) -> Particle {
    Particle::new(&at(point), 0.0, 0.0, 1.0, 0.97).unwrap()
}

fn unit_grid(w: u32, h: u32) -> ClothMesh {
    let config = GridConfig {
        rest_distance: 1.0,
        ..GridConfig::with_size(w, h)
    };
    ClothMesh::from_config(&config).unwrap()
}

// ─── Particle Tests ───────────────────────────────────────────

#[test]
fn particle_starts_at_rest_on_placement() {
    let p = particle_at(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(p.previous, p.position);
    assert_eq!(p.original(), p.position);
    assert_eq!(p.acceleration(), Vec3::ZERO);
}

#[test]
fn inverse_mass_matches_mass() {
    let p = Particle::new(&at(Vec3::ZERO), 0.0, 0.0, 0.1, 0.97).unwrap();
    assert!((p.inverse_mass() - 10.0).abs() < 1e-5);
}

#[test]
fn rejects_non_positive_mass() {
    for mass in [0.0, -1.0, f32::NAN] {
        let err = Particle::new(&at(Vec3::ZERO), 0.0, 0.0, mass, 0.97).unwrap_err();
        assert!(matches!(err, PennantError::InvalidParticle(_)));
    }
}

#[test]
fn rejects_non_finite_placement() {
    let err = Particle::new(&|_: f32, _: f32| Vec3::new(f32::NAN, 0.0, 0.0), 0.5, 0.25, 1.0, 0.97)
        .unwrap_err();
    assert!(matches!(err, PennantError::NonFinitePlacement { u, v } if u == 0.5 && v == 0.25));
}

#[test]
fn forces_accumulate_scaled_by_inverse_mass() {
    let mut p = Particle::new(&at(Vec3::ZERO), 0.0, 0.0, 2.0, 0.97).unwrap();
    p.add_force(Vec3::new(2.0, 0.0, 0.0));
    p.add_force(Vec3::new(0.0, 4.0, 0.0));
    assert_eq!(p.acceleration(), Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn integrate_clears_acceleration_and_records_previous() {
    let mut p = particle_at(Vec3::ZERO);
    p.position = Vec3::new(1.0, 0.0, 0.0);
    p.add_force(Vec3::new(0.0, -10.0, 0.0));
    let before = p.position;

    p.integrate(0.01);

    assert_eq!(p.previous, before);
    assert_eq!(p.acceleration(), Vec3::ZERO);
}

#[test]
fn drag_factor_must_lie_strictly_inside_unit_interval() {
    for drag in [0.0, 1.0, 1.5, f32::NAN] {
        let err = Particle::new(&at(Vec3::ZERO), 0.0, 0.0, 1.0, drag).unwrap_err();
        assert!(matches!(err, PennantError::InvalidParticle(_)), "{drag}");
    }
}

#[test]
fn integrate_applies_drag_to_implicit_velocity() {
    let mut p = Particle::new(&at(Vec3::ZERO), 0.0, 0.0, 1.0, 0.5).unwrap();
    p.position = Vec3::new(2.0, 0.0, 0.0);
    p.add_force(Vec3::new(0.0, 100.0, 0.0));

    p.integrate(0.01);

    // 2 + (2 - 0) * 0.5 on x, 100 * 0.01 on y
    assert!((p.position.x - 3.0).abs() < 1e-6);
    assert!((p.position.y - 1.0).abs() < 1e-6);
}

#[test]
fn pin_restores_original_without_motion() {
    let mut p = particle_at(Vec3::new(0.0, 5.0, 0.0));
    p.position = Vec3::new(3.0, 3.0, 3.0);
    p.previous = Vec3::new(2.0, 2.0, 2.0);
    p.pin();
    assert_eq!(p.position, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(p.displacement(), Vec3::ZERO);
}

// ─── Constraint Tests ─────────────────────────────────────────

#[test]
fn satisfy_moves_stretched_pair_toward_rest() {
    let mut a = particle_at(Vec3::ZERO);
    let mut b = particle_at(Vec3::new(3.0, 0.0, 0.0));
    satisfy_pair(&mut a, &mut b, 1.0);

    let d = a.position.distance(b.position);
    assert!((d - 1.0).abs() < (3.0 - 1.0));
    // Symmetric correction
    assert!((a.position.x - 1.0).abs() < 1e-6);
    assert!((b.position.x - 2.0).abs() < 1e-6);
}

#[test]
fn satisfy_moves_compressed_pair_toward_rest() {
    let mut a = particle_at(Vec3::ZERO);
    let mut b = particle_at(Vec3::new(0.0, 0.5, 0.0));
    satisfy_pair(&mut a, &mut b, 2.0);

    let d = a.position.distance(b.position);
    assert!(d > 0.5);
    assert!((d - 2.0).abs() < 1.5);
}

#[test]
fn satisfy_ignores_coincident_particles() {
    let point = Vec3::new(1.0, 1.0, 1.0);
    let mut a = particle_at(point);
    let mut b = particle_at(point);
    satisfy_pair(&mut a, &mut b, 1.0);
    assert_eq!(a.position, point);
    assert_eq!(b.position, point);
}

#[test]
fn constraint_satisfy_resolves_indices_in_either_order() {
    let mut particles = vec![
        particle_at(Vec3::ZERO),
        particle_at(Vec3::new(4.0, 0.0, 0.0)),
    ];
    let forward = Constraint::new(ParticleId(0), ParticleId(1), 2.0).unwrap();
    let backward = Constraint::new(ParticleId(1), ParticleId(0), 2.0).unwrap();

    let mut copy = particles.clone();
    forward.satisfy(&mut particles);
    backward.satisfy(&mut copy);

    assert!(forward.error(&particles).abs() < 1e-6);
    assert!(backward.error(&copy).abs() < 1e-6);
    assert_eq!(particles[0].position, copy[0].position);
}

#[test]
fn constraint_rejects_identical_endpoints() {
    assert!(matches!(
        Constraint::new(ParticleId(3), ParticleId(3), 1.0),
        Err(PennantError::InvalidMesh(_))
    ));
}

// ─── ClothMesh Tests ──────────────────────────────────────────

#[test]
fn grid_counts() {
    for (w, h) in [(1, 1), (2, 2), (3, 5), (10, 10)] {
        let cloth = unit_grid(w, h);
        assert_eq!(cloth.particle_count(), ((w + 1) * (h + 1)) as usize);
        assert_eq!(cloth.constraint_count(), (2 * w * h + w + h) as usize);
    }
}

#[test]
fn grid_index_is_row_major() {
    let cloth = unit_grid(4, 3);
    assert_eq!(cloth.index(0, 0), ParticleId(0));
    assert_eq!(cloth.index(4, 0), ParticleId(4));
    assert_eq!(cloth.index(0, 1), ParticleId(5));
    assert_eq!(cloth.index(2, 3), ParticleId(17));
    let p = cloth.particle(cloth.index(2, 3)).unwrap();
    assert_eq!(p.uv(), [0.5, 1.0]);
}

#[test]
fn constraints_cover_every_edge_once() {
    let cloth = unit_grid(3, 2);
    let mut edges: Vec<(u32, u32)> = cloth
        .constraints()
        .iter()
        .map(|c| (c.a().0.min(c.b().0), c.a().0.max(c.b().0)))
        .collect();
    let total = edges.len();
    edges.sort();
    edges.dedup();
    assert_eq!(edges.len(), total);
    // Only horizontal or vertical neighbours
    for (a, b) in edges {
        assert!(b - a == 1 || b - a == 4);
    }
}

#[test]
fn constraint_creation_order() {
    let cloth = unit_grid(2, 2);
    let c = cloth.constraints();
    // First cell: vertical then horizontal
    assert_eq!((c[0].a(), c[0].b()), (ParticleId(0), ParticleId(3)));
    assert_eq!((c[1].a(), c[1].b()), (ParticleId(0), ParticleId(1)));
    // Right column verticals follow the 8 cell links
    assert_eq!((c[8].a(), c[8].b()), (ParticleId(2), ParticleId(5)));
    assert_eq!((c[9].a(), c[9].b()), (ParticleId(5), ParticleId(8)));
    // Bottom row horizontals last
    assert_eq!((c[10].a(), c[10].b()), (ParticleId(6), ParticleId(7)));
    assert_eq!((c[11].a(), c[11].b()), (ParticleId(7), ParticleId(8)));
}

#[test]
fn plane_placement_spacing_matches_rest_distance() {
    let cloth = ClothMesh::from_config(&GridConfig::default()).unwrap();
    assert!(cloth.max_constraint_error() < 1e-3);
    let first = cloth.particles()[0].original();
    assert!((first.x + 125.0).abs() < 1e-4);
    assert!((first.y - 125.0).abs() < 1e-4);
}

#[test]
fn build_rejects_invalid_config() {
    let bad = [
        GridConfig::with_size(0, 4),
        GridConfig { particle_mass: 0.0, ..Default::default() },
        GridConfig { rest_distance: -1.0, ..Default::default() },
        GridConfig { damping: 1.0, ..Default::default() },
        GridConfig { damping: 0.0, ..Default::default() },
    ];
    for config in bad {
        assert!(ClothMesh::from_config(&config).is_err(), "{config:?}");
    }
}

#[test]
fn oversized_grid_is_rejected_not_overflowed() {
    for (w, h) in [(u32::MAX, 1), (1, u32::MAX), (65_535, 65_535)] {
        let config = GridConfig::with_size(w, h);
        assert!(
            matches!(config.validate(), Err(PennantError::InvalidConfig(_))),
            "{w}×{h}"
        );
        assert!(matches!(
            ClothMesh::from_config(&config),
            Err(PennantError::InvalidConfig(_))
        ));
    }
}

#[test]
fn build_rejects_non_finite_placement() {
    let config = GridConfig::with_size(2, 2);
    let placement = |u: f32, v: f32| Vec3::new(1.0 / (u - 0.5), v, 0.0);
    let err = ClothMesh::build(&config, &placement).unwrap_err();
    assert!(matches!(err, PennantError::NonFinitePlacement { .. }));
}

#[test]
fn relax_then_reset() {
    let mut cloth = unit_grid(2, 2);
    cloth.particles_mut()[4].position += Vec3::new(0.0, 0.0, 0.5);
    cloth.relax_constraints();
    assert!(cloth.max_displacement() > 0.0);

    cloth.reset();
    assert_eq!(cloth.max_displacement(), 0.0);
    assert_eq!(cloth.kinetic_energy(0.018), 0.0);
}

#[test]
fn custom_placement_closure() {
    let config = GridConfig::with_size(4, 4);
    let placement = PlanePlacement::new(8.0, 4.0);
    let cloth = ClothMesh::build(&config, &placement).unwrap();
    let last = cloth.particles()[cloth.particle_count() - 1].original();
    assert_eq!(last, Vec3::new(4.0, 6.0, 0.0));
}

// ─── SurfaceMesh Tests ────────────────────────────────────────

#[test]
fn surface_matches_grid() {
    let cloth = unit_grid(3, 2);
    let surface = SurfaceMesh::from_cloth(&cloth);
    assert_eq!(surface.vertex_count(), cloth.particle_count());
    assert_eq!(surface.triangle_count(), 12);
    assert!(surface.validate().is_ok());
    assert_eq!(surface.triangle(0), [0, 1, 4]);
    assert_eq!(surface.triangle(1), [1, 5, 4]);
}

#[test]
fn flat_banner_normals_face_z() {
    let cloth = unit_grid(2, 2);
    let surface = SurfaceMesh::from_cloth(&cloth);
    for i in 0..surface.vertex_count() {
        let n = surface.normal(i);
        assert!((n - Vec3::Z).length() < 1e-5, "vertex {i}: {n:?}");
    }
}

#[test]
fn sync_positions_copies_cloth_state() {
    let mut cloth = unit_grid(2, 2);
    let mut surface = SurfaceMesh::from_cloth(&cloth);
    cloth.particles_mut()[4].position.z = 3.0;

    surface.sync_positions(&cloth).unwrap();
    assert_eq!(surface.position(4).z, 3.0);
}

#[test]
fn sync_positions_rejects_size_mismatch() {
    let mut surface = SurfaceMesh::from_cloth(&unit_grid(2, 2));
    let other = unit_grid(3, 3);
    assert!(surface.sync_positions(&other).is_err());
}

#[test]
fn validate_catches_bad_index() {
    let mut surface = SurfaceMesh::from_cloth(&unit_grid(1, 1));
    surface.indices[2] = 99;
    assert!(surface.validate().is_err());
}

#[test]
fn normals_follow_bent_geometry() {
    let mut cloth = unit_grid(1, 1);
    let mut surface = SurfaceMesh::from_cloth(&cloth);
    // Rotate the square into the XZ plane: normals should lose their Z
    for p in cloth.particles_mut() {
        p.position = Vec3::new(p.position.x, 0.0, p.position.y);
    }
    surface.sync_positions(&cloth).unwrap();
    compute_vertex_normals(&mut surface);
    for i in 0..surface.vertex_count() {
        assert!(surface.normal(i).z.abs() < 1e-5);
        assert!((surface.normal(i).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn surface_serializes_to_json() {
    let surface = SurfaceMesh::from_cloth(&unit_grid(1, 1));
    let json = serde_json::to_string(&surface).unwrap();
    let back: SurfaceMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back.indices, surface.indices);
}
