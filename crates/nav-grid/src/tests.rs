//! Unit tests for nav-grid.
//!
//! Grids are built in code or from small ASCII layouts; nothing touches disk.

#[cfg(test)]
mod helpers {
    use nav_core::{EntityId, GridPos};

    use crate::GridModel;

    pub const DOOR: EntityId = EntityId(500);

    pub fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    /// 5 × 5 open floor.
    pub fn open_5x5() -> GridModel {
        GridModel::filled(5, 5)
    }
}

// ── Tiles ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tiles {
    use super::helpers::*;
    use crate::{MIN_TERRAIN_COST, Tile};

    #[test]
    fn non_finite_and_sub_unit_costs_are_clamped() {
        assert_eq!(Tile::rough(f64::NAN).terrain_cost(), MIN_TERRAIN_COST);
        assert_eq!(Tile::rough(f64::INFINITY).terrain_cost(), MIN_TERRAIN_COST);
        assert_eq!(Tile::rough(0.0).terrain_cost(), MIN_TERRAIN_COST);
        assert_eq!(Tile::rough(-4.0).terrain_cost(), MIN_TERRAIN_COST);
        assert_eq!(Tile::rough(0.25).terrain_cost(), MIN_TERRAIN_COST);
        assert_eq!(Tile::rough(2.5).terrain_cost(), 2.5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_costs_are_clamped() {
        let json = r#"{"walkable":true,"blocks_line_of_sight":false,"terrain_cost":-3.0}"#;
        let tile: Tile = serde_json::from_str(json).expect("valid tile");
        assert_eq!(tile.terrain_cost(), MIN_TERRAIN_COST);

        let json = r#"{"walkable":true,"blocks_line_of_sight":false,"terrain_cost":0.5}"#;
        let tile: Tile = serde_json::from_str(json).expect("valid tile");
        assert_eq!(tile.terrain_cost(), MIN_TERRAIN_COST);

        let rough = Tile::rough(3.0);
        let back: Tile = serde_json::from_str(&serde_json::to_string(&rough).expect("serialize"))
            .expect("deserialize");
        assert_eq!(back, rough);
    }

    #[test]
    fn missing_tile_is_impassable_and_opaque() {
        let grid = open_5x5();
        assert!(!grid.is_walkable(p(9, 9), None));
        assert!(grid.blocks_line_of_sight(p(9, 9)));
        assert_eq!(grid.movement_cost(p(9, 9)), f64::INFINITY);
    }

    #[test]
    fn movement_cost_follows_terrain() {
        let mut grid = open_5x5();
        grid.set_tile(p(1, 1), Tile::rough(4.0));
        grid.set_tile(p(2, 2), Tile::solid());
        assert_eq!(grid.movement_cost(p(0, 0)), 1.0);
        assert_eq!(grid.movement_cost(p(1, 1)), 4.0);
        assert_eq!(grid.movement_cost(p(2, 2)), f64::INFINITY);
    }

    #[test]
    fn set_tile_is_an_upsert() {
        let mut grid = open_5x5();
        let before = grid.tile_count();
        grid.set_tile(p(0, 0), Tile::rough(2.0));
        grid.set_tile(p(0, 0), Tile::rough(2.0));
        assert_eq!(grid.tile_count(), before);
        assert_eq!(grid.tile(p(0, 0)).map(|t| t.terrain_cost()), Some(2.0));
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod obstacles {
    use nav_core::EntityId;

    use super::helpers::*;
    use crate::{DoorState, Obstacle};

    #[test]
    fn wall_blocks_walking() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(2, 2)));
        assert!(!grid.is_walkable(p(2, 2), None));
        assert!(!grid.is_walkable(p(2, 2), Some(EntityId(1))));
        assert!(grid.is_walkable(p(2, 3), None));
    }

    #[test]
    fn one_obstacle_per_cell_last_write_wins() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(2, 2)));
        grid.set_obstacle(Obstacle::door(EntityId(2), p(2, 2), DoorState::Open));

        assert!(grid.obstacle(EntityId(1)).is_none());
        assert_eq!(grid.obstacle_at(p(2, 2)).map(Obstacle::id), Some(EntityId(2)));
        assert_eq!(grid.obstacle_count(), 1);
        assert!(grid.is_walkable(p(2, 2), None));
    }

    #[test]
    fn re_setting_an_id_moves_it() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(1, 1)));
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(3, 3)));

        assert!(grid.obstacle_at(p(1, 1)).is_none());
        assert!(grid.is_walkable(p(1, 1), None));
        assert!(!grid.is_walkable(p(3, 3), None));
        assert_eq!(grid.obstacle_count(), 1);
    }

    #[test]
    fn remove_obstacle_frees_the_cell() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(2, 2)));
        assert!(grid.remove_obstacle(EntityId(1)).is_some());
        assert!(grid.remove_obstacle(EntityId(1)).is_none());
        assert!(grid.is_walkable(p(2, 2), None));
    }

    #[test]
    fn body_obstacle_is_ignored_only_for_its_own_id() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::body(EntityId(7), p(1, 0)));
        assert!(!grid.is_walkable(p(1, 0), None));
        assert!(!grid.is_walkable(p(1, 0), Some(EntityId(8))));
        assert!(grid.is_walkable(p(1, 0), Some(EntityId(7))));
    }
}

// ── Doors ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod doors {
    use nav_core::EntityId;

    use super::helpers::*;
    use crate::{DoorCredentials, DoorState, GridModel, Obstacle};

    fn grid_with_door(state: DoorState) -> GridModel {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::door(DOOR, p(2, 2), state));
        grid
    }

    #[test]
    fn only_open_doors_are_walkable() {
        for (state, walkable) in [
            (DoorState::Open, true),
            (DoorState::Closed, false),
            (DoorState::Locked, false),
        ] {
            let grid = grid_with_door(state);
            assert_eq!(grid.is_walkable(p(2, 2), None), walkable, "{state}");
        }
    }

    #[test]
    fn set_door_state_rejects_non_doors() {
        let mut grid = grid_with_door(DoorState::Closed);
        grid.set_obstacle(Obstacle::wall(EntityId(1), p(0, 0)));

        assert!(!grid.set_door_state(EntityId(1), DoorState::Open));
        assert!(!grid.set_door_state(EntityId(999), DoorState::Open));
        assert!(grid.set_door_state(DOOR, DoorState::Locked));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Locked));
    }

    #[test]
    fn try_open_already_open_or_closed() {
        let mut grid = grid_with_door(DoorState::Open);
        assert!(grid.try_open_door(DOOR, DoorCredentials::default()));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Open));

        let mut grid = grid_with_door(DoorState::Closed);
        assert!(grid.try_open_door(DOOR, DoorCredentials::default()));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Open));
    }

    #[test]
    fn locked_door_needs_key_or_skill() {
        let mut grid = grid_with_door(DoorState::Locked);
        assert!(!grid.try_open_door(DOOR, DoorCredentials::default()));
        assert!(!grid.try_open_door(DOOR, DoorCredentials::lockpick(59)));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Locked));

        assert!(grid.try_open_door(DOOR, DoorCredentials::lockpick(60)));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Open));

        let mut grid = grid_with_door(DoorState::Locked);
        assert!(grid.try_open_door(DOOR, DoorCredentials::key()));
        assert_eq!(grid.door(DOOR).map(|d| d.state), Some(DoorState::Open));
    }

    #[test]
    fn lockpick_threshold_is_configurable() {
        let mut grid = grid_with_door(DoorState::Locked).with_lockpick_threshold(80);
        assert!(!grid.try_open_door(DOOR, DoorCredentials::lockpick(60)));
        assert!(grid.try_open_door(DOOR, DoorCredentials::lockpick(80)));
    }

    #[test]
    fn try_open_missing_door_is_false() {
        let mut grid = open_5x5();
        assert!(!grid.try_open_door(DOOR, DoorCredentials::key()));
    }

    #[test]
    fn door_at_returns_snapshot() {
        let grid = grid_with_door(DoorState::Closed);
        let door = grid.door_at(p(2, 2));
        assert_eq!(door.map(|d| d.id), Some(DOOR));
        assert!(grid.door_at(p(0, 0)).is_none());
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use nav_core::EntityId;

    use super::helpers::*;

    #[test]
    fn occupied_cell_blocks_everyone_but_the_occupant() {
        let mut grid = open_5x5();
        grid.set_occupied(p(1, 1), EntityId(3));

        assert!(grid.is_occupied(p(1, 1)));
        assert!(!grid.is_walkable(p(1, 1), None));
        assert!(!grid.is_walkable(p(1, 1), Some(EntityId(4))));
        assert!(grid.is_walkable(p(1, 1), Some(EntityId(3))));

        assert_eq!(grid.clear_occupied(p(1, 1)), Some(EntityId(3)));
        assert!(grid.is_walkable(p(1, 1), None));
    }

    #[test]
    fn move_occupied_leaves_foreign_entries_alone() {
        let mut grid = open_5x5();
        grid.set_occupied(p(0, 0), EntityId(9));
        grid.move_occupied(EntityId(3), p(0, 0), p(1, 0));

        assert_eq!(grid.occupant(p(0, 0)), Some(EntityId(9)));
        assert_eq!(grid.occupant(p(1, 0)), Some(EntityId(3)));
    }
}

// ── Line of sight ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sight {
    use nav_core::EntityId;

    use super::helpers::*;
    use crate::obstacle::Wall;
    use crate::sight::line_between;
    use crate::{DoorState, Obstacle, Tile};

    #[test]
    fn line_excludes_endpoints() {
        assert_eq!(line_between(p(0, 0), p(3, 0)), vec![p(1, 0), p(2, 0)]);
        assert_eq!(line_between(p(0, 0), p(2, 2)), vec![p(1, 1)]);
        assert!(line_between(p(0, 0), p(1, 1)).is_empty());
        assert!(line_between(p(2, 2), p(2, 2)).is_empty());
    }

    #[test]
    fn walls_and_closed_doors_block_sight() {
        let mut grid = open_5x5();
        assert!(grid.has_line_of_sight(p(0, 2), p(4, 2)));

        grid.set_obstacle(Obstacle::door(DOOR, p(2, 2), DoorState::Closed));
        assert!(!grid.has_line_of_sight(p(0, 2), p(4, 2)));

        grid.set_door_state(DOOR, DoorState::Open);
        assert!(grid.has_line_of_sight(p(0, 2), p(4, 2)));

        grid.set_obstacle(Obstacle::wall(EntityId(1), p(2, 2)));
        assert!(!grid.has_line_of_sight(p(0, 2), p(4, 2)));
    }

    #[test]
    fn windows_do_not_block_sight() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::Wall(Wall {
            id: EntityId(1),
            pos: p(2, 2),
            blocks_line_of_sight: false,
        }));
        assert!(!grid.is_walkable(p(2, 2), None));
        assert!(grid.has_line_of_sight(p(0, 2), p(4, 2)));
    }

    #[test]
    fn opaque_tile_blocks_sight() {
        let mut grid = open_5x5();
        grid.set_tile(p(2, 2), Tile::new(true, true, 1.0));
        assert!(grid.blocks_line_of_sight(p(2, 2)));
        assert!(!grid.has_line_of_sight(p(0, 2), p(4, 2)));
    }

    #[test]
    fn bodies_do_not_block_sight() {
        let mut grid = open_5x5();
        grid.set_obstacle(Obstacle::body(EntityId(1), p(2, 2)));
        assert!(!grid.blocks_line_of_sight(p(2, 2)));
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use nav_core::EntityId;

    use super::helpers::*;
    use crate::layout::ROUGH_TERRAIN_COST;
    use crate::{DoorState, GridError, parse_ascii_layout};

    #[test]
    fn glyphs_map_to_cells() {
        let text = "#.~\nDLO\n% .";
        let grid = parse_ascii_layout(text, EntityId(10)).expect("valid layout");

        assert!(!grid.is_walkable(p(0, 0), None));
        assert!(grid.is_walkable(p(1, 0), None));
        assert_eq!(grid.movement_cost(p(2, 0)), ROUGH_TERRAIN_COST);

        assert_eq!(grid.door_at(p(0, 1)).map(|d| d.state), Some(DoorState::Closed));
        assert_eq!(grid.door_at(p(1, 1)).map(|d| d.state), Some(DoorState::Locked));
        assert_eq!(grid.door_at(p(2, 1)).map(|d| d.state), Some(DoorState::Open));

        assert!(!grid.is_walkable(p(0, 2), None));
        assert!(!grid.blocks_line_of_sight(p(0, 2)));
        assert!(grid.tile(p(1, 2)).is_none());
    }

    #[test]
    fn obstacle_ids_are_row_major() {
        let grid = parse_ascii_layout("#.#\n.D.", EntityId(10)).expect("valid layout");
        assert_eq!(grid.obstacle_at(p(0, 0)).map(|o| o.id()), Some(EntityId(10)));
        assert_eq!(grid.obstacle_at(p(2, 0)).map(|o| o.id()), Some(EntityId(11)));
        assert_eq!(grid.obstacle_at(p(1, 1)).map(|o| o.id()), Some(EntityId(12)));
    }

    #[test]
    fn unknown_glyph_is_rejected() {
        let err = parse_ascii_layout("..\n.?", EntityId(0)).unwrap_err();
        assert!(matches!(err, GridError::Layout { row: 1, column: 1, glyph: '?' }));
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use nav_core::EntityId;

    use super::helpers::*;
    use crate::{DoorState, GridError, GridModel, Obstacle, load_obstacles_reader, load_tiles_reader};

    #[test]
    fn tiles_round_through_csv() {
        let csv = "x,y,walkable,blocks_line_of_sight,terrain_cost\n\
                   0,0,true,false,1.0\n\
                   1,0,true,false,2.5\n\
                   2,0,false,true,1.0\n";
        let mut grid = GridModel::new();
        let n = load_tiles_reader(Cursor::new(csv), &mut grid).expect("valid csv");

        assert_eq!(n, 3);
        assert_eq!(grid.movement_cost(p(1, 0)), 2.5);
        assert!(!grid.is_walkable(p(2, 0), None));
    }

    #[test]
    fn obstacles_load_with_defaults() {
        let csv = "id,kind,x,y,state,blocks_line_of_sight\n\
                   100,wall,0,0,,\n\
                   101,door,1,0,locked,false\n\
                   102,body,2,0,,\n";
        let mut grid = open_5x5();
        let n = load_obstacles_reader(Cursor::new(csv), &mut grid).expect("valid csv");

        assert_eq!(n, 3);
        assert!(matches!(grid.obstacle(EntityId(100)), Some(Obstacle::Wall(w)) if w.blocks_line_of_sight));
        let door = grid.door(EntityId(101)).expect("door loaded");
        assert_eq!(door.state, DoorState::Locked);
        assert!(!door.blocks_line_of_sight_when_closed);
        assert!(matches!(grid.obstacle(EntityId(102)), Some(Obstacle::Body(_))));
    }

    #[test]
    fn bad_row_leaves_grid_untouched() {
        let csv = "id,kind,x,y,state,blocks_line_of_sight\n\
                   100,wall,0,0,,\n\
                   101,door,1,0,ajar,\n";
        let mut grid = open_5x5();
        let err = load_obstacles_reader(Cursor::new(csv), &mut grid).unwrap_err();

        assert!(matches!(err, GridError::UnknownDoorState(s) if s == "ajar"));
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn unknown_kind_and_duplicate_ids_are_rejected() {
        let mut grid = open_5x5();
        let csv = "id,kind,x,y,state,blocks_line_of_sight\n1,tree,0,0,,\n";
        assert!(matches!(
            load_obstacles_reader(Cursor::new(csv), &mut grid),
            Err(GridError::UnknownObstacleKind(_))
        ));

        let csv = "id,kind,x,y,state,blocks_line_of_sight\n1,wall,0,0,,\n1,wall,1,1,,\n";
        assert!(matches!(
            load_obstacles_reader(Cursor::new(csv), &mut grid),
            Err(GridError::DuplicateObstacle(EntityId(1)))
        ));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use nav_core::EntityId;
    use proptest::prelude::*;

    use super::helpers::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// An occupied cell is blocked for everyone except its occupant.
        #[test]
        fn occupancy_respects_ignore(x in 0..5i32, y in 0..5i32, owner in 0..50u32, other in 50..100u32) {
            let mut grid = open_5x5();
            grid.set_occupied(p(x, y), EntityId(owner));
            prop_assert!(!grid.is_walkable(p(x, y), None));
            prop_assert!(!grid.is_walkable(p(x, y), Some(EntityId(other))));
            prop_assert!(grid.is_walkable(p(x, y), Some(EntityId(owner))));
        }

        /// Movement cost is finite exactly when the cell is walkable.
        #[test]
        fn cost_finite_iff_walkable(cost in -5.0..50.0f64, walkable in any::<bool>()) {
            let mut grid = open_5x5();
            grid.set_tile(p(0, 0), crate::Tile::new(walkable, false, cost));
            prop_assert_eq!(grid.movement_cost(p(0, 0)).is_finite(), walkable);
            prop_assert!(grid.movement_cost(p(0, 0)) > 0.0);
        }
    }
}
