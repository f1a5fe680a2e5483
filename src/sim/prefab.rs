//! Ready-made entities

use super::behavior::{BulletBehavior, EnemyBehavior, ObstacleBehavior, PlayerBehavior};
use super::collision::Collider;
use super::entity::{Entity, EntityKind};
use super::path::EnemyPath;
use super::shape::{BlockShape, Sprite, assets};
use super::transform::Transform;
use crate::consts::*;

pub fn player(x: f64, y: f64, max_ammo: u32) -> Entity {
    Entity::new(
        "player",
        EntityKind::Player,
        Transform::at(x, y),
        Collider::circle(PLAYER_RADIUS),
        Sprite::new(assets::PLAYER),
        PlayerBehavior::new(max_ammo),
    )
}

pub fn enemy(name: impl Into<String>, x: f64, y: f64, path: EnemyPath) -> Entity {
    Entity::new(
        name,
        EntityKind::Enemy,
        Transform::at(x, y),
        Collider::circle(ENEMY_RADIUS),
        Sprite::new(assets::ENEMY),
        EnemyBehavior::new(path),
    )
}

pub fn bullet(name: impl Into<String>, x: f64, y: f64) -> Entity {
    Entity::new(
        name,
        EntityKind::PlayerBullet,
        Transform::at(x, y),
        Collider::circle(BULLET_RADIUS),
        Sprite::new(assets::BULLET),
        BulletBehavior::default(),
    )
}

/// Block whose top-left corner sits at (x, y)
pub fn obstacle(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Entity {
    Entity::new(
        name,
        EntityKind::Obstacle,
        Transform::at(x, y),
        Collider::rect(width, height),
        BlockShape::new(width, height),
        ObstacleBehavior,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::point::Point;

    #[test]
    fn test_prefab_kinds_and_sizes() {
        let p = player(100.0, 380.0, 6);
        assert_eq!(p.kind(), EntityKind::Player);
        assert_eq!(p.collider().characteristic_dimension(), PLAYER_RADIUS);
        assert_eq!(p.behavior().ammo(), Some(6));

        let e = enemy("enemy0", 50.0, 70.0, EnemyPath::straight(50.0));
        assert_eq!(e.kind(), EntityKind::Enemy);
        assert!(e.behavior().path().is_some());
        assert!(!e.behavior().is_frozen());

        let b = bullet("player_bullet_0", 1.0, 2.0);
        assert_eq!(b.kind(), EntityKind::PlayerBullet);
        assert_eq!(b.collider().characteristic_dimension(), BULLET_RADIUS);
    }

    #[test]
    fn test_obstacle_collider_spans_block() {
        let o = obstacle("obstacle", 160.0, 250.0, 40.0, 40.0);
        assert_eq!(o.collider().characteristic_dimension(), 20.0);
        assert_eq!(o.collider().centroid(), Point::new(180.0, 270.0));
    }
}
