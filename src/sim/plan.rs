//! Level plan glyphs and the built-in sample plan

use super::level::Cell;

/// The small demo level: one player, two coins, a sweeping lava block
pub const SIMPLE_LEVEL_PLAN: [&str; 9] = [
    "                      ",
    "                      ",
    "  x              = x  ",
    "  x         o o    x  ",
    "  x @      xxxxx   x  ",
    "  xxxxx            x  ",
    "      x!!!!!!!!!!!!x  ",
    "      xxxxxxxxxxxxxx  ",
    "                      ",
];

/// How a moving lava block travels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LavaMotion {
    /// `=`: sweeps left/right at speed 2
    Horizontal,
    /// `|`: sweeps up/down at speed 2
    Vertical,
    /// `v`: falls at speed 3, restarting from its spawn when blocked
    Dripping,
}

/// Actor spawned by a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    Player,
    Coin,
    Lava(LavaMotion),
}

/// Meaning of a single plan character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Terrain(Cell),
    Actor(Spawn),
}

impl Glyph {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '@' => Glyph::Actor(Spawn::Player),
            'o' => Glyph::Actor(Spawn::Coin),
            '=' => Glyph::Actor(Spawn::Lava(LavaMotion::Horizontal)),
            '|' => Glyph::Actor(Spawn::Lava(LavaMotion::Vertical)),
            'v' => Glyph::Actor(Spawn::Lava(LavaMotion::Dripping)),
            'x' => Glyph::Terrain(Cell::Wall),
            '!' => Glyph::Terrain(Cell::Lava),
            _ => Glyph::Terrain(Cell::Empty),
        }
    }
}

/// Split a level pack into plans. Plans are separated by empty lines.
pub fn split_plans(text: &str) -> Vec<Vec<String>> {
    let mut plans = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            if !current.is_empty() {
                plans.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        plans.push(current);
    }

    plans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_table() {
        assert_eq!(Glyph::from_char('x'), Glyph::Terrain(Cell::Wall));
        assert_eq!(Glyph::from_char('!'), Glyph::Terrain(Cell::Lava));
        assert_eq!(Glyph::from_char(' '), Glyph::Terrain(Cell::Empty));
        assert_eq!(Glyph::from_char('#'), Glyph::Terrain(Cell::Empty));
        assert_eq!(Glyph::from_char('@'), Glyph::Actor(Spawn::Player));
        assert_eq!(
            Glyph::from_char('v'),
            Glyph::Actor(Spawn::Lava(LavaMotion::Dripping))
        );
    }

    #[test]
    fn test_split_plans() {
        let text = "x@x\r\nxxx\n\n\n o \n@  \n";
        let plans = split_plans(text);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0], vec!["x@x", "xxx"]);
        assert_eq!(plans[1], vec![" o ", "@  "]);
    }

    #[test]
    fn test_bundled_pack_builds() {
        let plans = split_plans(include_str!("../../levels/pack.txt"));
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0], SIMPLE_LEVEL_PLAN);
        for plan in &plans {
            crate::sim::Level::new(plan).unwrap();
        }
    }

    #[test]
    fn test_sample_plan_is_rectangular() {
        let width = SIMPLE_LEVEL_PLAN[0].len();
        assert!(SIMPLE_LEVEL_PLAN.iter().all(|row| row.len() == width));
    }
}
