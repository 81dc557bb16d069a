use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn distance_squared(self, other: Pos) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn within(self, other: Pos, max_distance: f64) -> bool {
        f64::from(self.distance_squared(other)) <= max_distance * max_distance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Empty,
    Orb,
    SpellMakeOrb,
    Mine,
    MineKing,
    Dragon,
    Wall,
    Mimic,
    Medikit,
    RatKing,
    Rat,
    Slime,
    Gargoyle,
    Minotaur,
    Chest,
    Skeleton,
    Treasure,
    Snake,
    Giant,
    Decoration,
    Wizard,
    Gazer,
    SpellDisarm,
    BigSlime,
    SpellRevealRats,
    SpellRevealSlimes,
    Gnome,
    Bat,
    Guard,
    Crown,
    Fidel,
    DragonEgg,
    Death,
    DarkKnight,
    Eye,
}

impl EntityKind {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Two-letter code used by text renderings of a floor.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Empty => "..",
            Self::Orb => "Ob",
            Self::SpellMakeOrb => "So",
            Self::Mine => "Mi",
            Self::MineKing => "MK",
            Self::Dragon => "DR",
            Self::Wall => "##",
            Self::Mimic => "Mm",
            Self::Medikit => "+m",
            Self::RatKing => "RK",
            Self::Rat => "Ra",
            Self::Slime => "Sl",
            Self::Gargoyle => "Ga",
            Self::Minotaur => "Mn",
            Self::Chest => "Ch",
            Self::Skeleton => "Sk",
            Self::Treasure => "$$",
            Self::Snake => "Sn",
            Self::Giant => "Gi",
            Self::Decoration => "~~",
            Self::Wizard => "Wz",
            Self::Gazer => "Gz",
            Self::SpellDisarm => "Sd",
            Self::BigSlime => "BS",
            Self::SpellRevealRats => "Sr",
            Self::SpellRevealSlimes => "Ss",
            Self::Gnome => "Gn",
            Self::Bat => "Bt",
            Self::Guard => "Gd",
            Self::Crown => "Cr",
            Self::Fidel => "Fi",
            Self::DragonEgg => "Eg",
            Self::Death => "De",
            Self::DarkKnight => "DK",
            Self::Eye => "Ey",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_neighbour_is_within_one_and_a_half() {
        let origin = Pos::new(3, 3);
        assert!(origin.within(Pos::new(4, 4), 1.5));
        assert!(!origin.within(Pos::new(5, 4), 1.5));
        assert!(origin.within(Pos::new(5, 3), 2.0));
    }

    #[test]
    fn entity_kind_serializes_as_snake_case() {
        let encoded = serde_json::to_string(&EntityKind::DragonEgg).expect("kind should encode");
        assert_eq!(encoded, "\"dragon_egg\"");
    }
}
