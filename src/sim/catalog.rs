//! Entity catalog
//!
//! Immutable templates for every archetype the game spawns. Built once at
//! startup and shared by reference; nothing mutates it afterwards.

use glam::IVec2;

use crate::assets::{SpriteSheet, TextureLoader};
use crate::consts::{BOSS_HEALTH, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::settings::Settings;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Health,
    Invisibility,
    DoubleFireDamage,
    /// A spoiled drink: enemy contact hurts twice as much while it lasts
    DoubleEnemyDamage,
    Spread,
}

/// Boss variants, addressed directly by pattern symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossKind {
    Gull,
    Crab,
    Kraken,
}

impl BossKind {
    pub const ALL: [BossKind; 3] = [BossKind::Gull, BossKind::Crab, BossKind::Kraken];

    pub fn index(self) -> usize {
        match self {
            BossKind::Gull => 0,
            BossKind::Crab => 1,
            BossKind::Kraken => 2,
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Enemy,
    Boss(BossKind),
    PowerUp(PowerUpKind),
    Projectile,
}

/// What an entity can do, resolved once from its role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Expires once its health reaches zero
    pub destructible: bool,
    /// Wrapped in a box that has to be shot open first
    pub boxed: bool,
    /// Consumed by the player on contact
    pub collectible: bool,
    /// Hurts the player on contact
    pub hostile: bool,
    /// Fired by the player
    pub projectile: bool,
}

impl Capabilities {
    pub fn for_role(role: Role, boxed: bool) -> Self {
        match role {
            Role::Enemy | Role::Boss(_) => Self {
                destructible: true,
                hostile: true,
                ..Self::default()
            },
            Role::PowerUp(_) => Self {
                boxed,
                collectible: !boxed,
                ..Self::default()
            },
            Role::Projectile => Self {
                projectile: true,
                ..Self::default()
            },
        }
    }
}

/// Blueprint stamped into a pool slot on creation
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTemplate {
    pub name: &'static str,
    pub role: Role,
    pub caps: Capabilities,
    /// Direction and relative speed; scaled by the pool's speed at creation
    pub velocity: IVec2,
    pub sprite: SpriteSheet,
    pub health: i32,
}

/// Static description of an archetype before its texture is loaded
struct Archetype {
    name: &'static str,
    path: &'static str,
    frame: (i32, i32),
    frames: u32,
    health: i32,
    role: Role,
}

const ENEMIES: [Archetype; 5] = [
    Archetype {
        name: "straw",
        path: "assets/images/straw.png",
        frame: (32, 32),
        frames: 1,
        health: 3,
        role: Role::Enemy,
    },
    Archetype {
        name: "rings",
        path: "assets/images/rings.png",
        frame: (32, 32),
        frames: 1,
        health: 6,
        role: Role::Enemy,
    },
    Archetype {
        name: "anchor",
        path: "assets/images/anchor.png",
        frame: (32, 32),
        frames: 1,
        health: 9,
        role: Role::Enemy,
    },
    Archetype {
        name: "bottle",
        path: "assets/images/bottle.png",
        frame: (32, 32),
        frames: 2,
        health: 2,
        role: Role::Enemy,
    },
    Archetype {
        name: "tire",
        path: "assets/images/tire.png",
        frame: (32, 32),
        frames: 4,
        health: 12,
        role: Role::Enemy,
    },
];

const BOSSES: [Archetype; 3] = [
    Archetype {
        name: "gull",
        path: "assets/images/gull.png",
        frame: (96, 96),
        frames: 4,
        health: BOSS_HEALTH,
        role: Role::Boss(BossKind::Gull),
    },
    Archetype {
        name: "crab",
        path: "assets/images/crab.png",
        frame: (96, 96),
        frames: 2,
        health: BOSS_HEALTH,
        role: Role::Boss(BossKind::Crab),
    },
    Archetype {
        name: "kraken",
        path: "assets/images/kraken.png",
        frame: (96, 96),
        frames: 4,
        health: BOSS_HEALTH,
        role: Role::Boss(BossKind::Kraken),
    },
];

const POWERUPS: [Archetype; 5] = [
    Archetype {
        name: "cake_slice",
        path: "assets/images/cake_slice.png",
        frame: (32, 32),
        frames: 1,
        health: 0,
        role: Role::PowerUp(PowerUpKind::Health),
    },
    Archetype {
        name: "coconut",
        path: "assets/images/coconut.png",
        frame: (32, 32),
        frames: 1,
        health: 0,
        role: Role::PowerUp(PowerUpKind::Invisibility),
    },
    Archetype {
        name: "mango",
        path: "assets/images/mango.png",
        frame: (32, 32),
        frames: 1,
        health: 0,
        role: Role::PowerUp(PowerUpKind::DoubleFireDamage),
    },
    Archetype {
        name: "not_coke",
        path: "assets/images/not_coke.png",
        frame: (32, 32),
        frames: 1,
        health: 0,
        role: Role::PowerUp(PowerUpKind::DoubleEnemyDamage),
    },
    Archetype {
        name: "tea",
        path: "assets/images/tea.png",
        frame: (32, 32),
        frames: 1,
        health: 0,
        role: Role::PowerUp(PowerUpKind::Spread),
    },
];

const PROJECTILE: Archetype = Archetype {
    name: "shell",
    path: "assets/images/shell.png",
    frame: (8, 16),
    frames: 2,
    health: 1,
    role: Role::Projectile,
};

const BOX_WRAPPER_PATH: &str = "assets/images/crate.png";
const PLAYER_PATH: &str = "assets/images/player.png";

impl Archetype {
    fn sheet(&self, loader: &mut impl TextureLoader) -> SpriteSheet {
        SpriteSheet {
            texture: loader.load(self.path),
            frame_width: self.frame.0,
            frame_height: self.frame.1,
            frame_count: self.frames,
        }
    }

    fn template(&self, loader: &mut impl TextureLoader, box_hits: Option<i32>) -> EntityTemplate {
        let velocity = match self.role {
            Role::Projectile => IVec2::new(0, -1),
            _ => IVec2::new(0, 1),
        };
        EntityTemplate {
            name: self.name,
            role: self.role,
            caps: Capabilities::for_role(self.role, box_hits.is_some()),
            velocity,
            sprite: self.sheet(loader),
            health: box_hits.unwrap_or(self.health),
        }
    }
}

/// All entity templates plus the shared wrapper and player sprites
#[derive(Debug, Clone)]
pub struct Catalog {
    enemies: Vec<EntityTemplate>,
    bosses: Vec<EntityTemplate>,
    powerups: Vec<EntityTemplate>,
    projectile: EntityTemplate,
    box_wrapper: SpriteSheet,
    player: SpriteSheet,
}

impl Catalog {
    /// Build every template, loading textures through `loader`
    pub fn new(settings: &Settings, loader: &mut impl TextureLoader) -> Self {
        let enemies = ENEMIES.iter().map(|a| a.template(loader, None)).collect();
        let bosses = BOSSES.iter().map(|a| a.template(loader, None)).collect();
        // Power-ups always arrive boxed; the box's hit points live in `health`
        let powerups = POWERUPS
            .iter()
            .map(|a| a.template(loader, Some(settings.box_hits)))
            .collect();
        let projectile = PROJECTILE.template(loader, None);
        let box_wrapper = SpriteSheet {
            texture: loader.load(BOX_WRAPPER_PATH),
            frame_width: 32,
            frame_height: 32,
            frame_count: 2,
        };
        let player = SpriteSheet {
            texture: loader.load(PLAYER_PATH),
            frame_width: PLAYER_WIDTH,
            frame_height: PLAYER_HEIGHT,
            frame_count: 2,
        };

        log::info!(
            "Catalog: {} enemies, {} bosses, {} power-ups",
            ENEMIES.len(),
            BOSSES.len(),
            POWERUPS.len()
        );

        Self {
            enemies,
            bosses,
            powerups,
            projectile,
            box_wrapper,
            player,
        }
    }

    pub fn enemies(&self) -> &[EntityTemplate] {
        &self.enemies
    }

    pub fn bosses(&self) -> &[EntityTemplate] {
        &self.bosses
    }

    pub fn powerups(&self) -> &[EntityTemplate] {
        &self.powerups
    }

    pub fn enemy(&self, index: usize) -> &EntityTemplate {
        &self.enemies[index % self.enemies.len()]
    }

    pub fn boss(&self, kind: BossKind) -> &EntityTemplate {
        &self.bosses[kind.index()]
    }

    pub fn powerup(&self, index: usize) -> &EntityTemplate {
        &self.powerups[index % self.powerups.len()]
    }

    pub fn projectile(&self) -> &EntityTemplate {
        &self.projectile
    }

    /// Crate sprite drawn over boxed power-ups (frame 0 intact, 1 broken)
    pub fn box_wrapper(&self) -> &SpriteSheet {
        &self.box_wrapper
    }

    pub fn player(&self) -> &SpriteSheet {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::HandleRegistry;

    fn catalog() -> Catalog {
        Catalog::new(&Settings::default(), &mut HandleRegistry::new())
    }

    #[test]
    fn test_catalog_counts() {
        let catalog = catalog();
        assert_eq!(catalog.enemies().len(), 5);
        assert_eq!(catalog.bosses().len(), 3);
        assert_eq!(catalog.powerups().len(), 5);
    }

    #[test]
    fn test_enemy_capabilities() {
        let catalog = catalog();
        for enemy in catalog.enemies() {
            assert!(enemy.caps.destructible);
            assert!(enemy.caps.hostile);
            assert!(!enemy.caps.collectible);
            assert!(enemy.velocity.y > 0);
        }
        assert_eq!(catalog.enemy(2).name, "anchor");
        assert_eq!(catalog.enemy(2).health, 9);
    }

    #[test]
    fn test_powerups_start_boxed() {
        let catalog = catalog();
        for powerup in catalog.powerups() {
            assert!(powerup.caps.boxed);
            assert!(!powerup.caps.collectible);
            assert!(!powerup.caps.destructible);
            assert_eq!(powerup.health, crate::consts::BOX_HITS);
        }
    }

    #[test]
    fn test_boss_lookup_by_kind() {
        let catalog = catalog();
        for kind in BossKind::ALL {
            let boss = catalog.boss(kind);
            assert_eq!(boss.role, Role::Boss(kind));
            assert_eq!(boss.health, BOSS_HEALTH);
        }
    }

    #[test]
    fn test_projectile_moves_up() {
        let catalog = catalog();
        let shell = catalog.projectile();
        assert!(shell.caps.projectile);
        assert!(!shell.caps.destructible);
        assert!(shell.velocity.y < 0);
    }

    #[test]
    fn test_textures_shared_not_duplicated() {
        let mut registry = HandleRegistry::new();
        let catalog = Catalog::new(&Settings::default(), &mut registry);
        // 5 enemies + 3 bosses + 5 power-ups + shell + crate + player
        assert_eq!(registry.len(), 16);
        assert_ne!(catalog.box_wrapper().texture, catalog.player().texture);
    }
}
