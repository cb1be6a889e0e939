//! Closed vocabularies shared by the identity tables and the event payloads.
//!
//! Every enum here has a stable integer code, because the code (not the name)
//! is what lands in the record file. Conversions from host values never fail:
//! anything unrecognised collapses to an explicit `Unknown`/`None` variant.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
    Green,
    None,
}

impl Team {
    pub fn code(self) -> i32 {
        match self {
            Team::Blue => 0,
            Team::Red => 1,
            Team::Green => 2,
            Team::None => 3,
        }
    }

    /// `None` for codes outside 0..=3.
    pub fn from_code(code: i32) -> Option<Team> {
        match code {
            0 => Some(Team::Blue),
            1 => Some(Team::Red),
            2 => Some(Team::Green),
            3 => Some(Team::None),
            _ => None,
        }
    }

    /// Team of a team-specific player start, keyed by its editor number.
    pub fn from_spawn_doomednum(doomednum: u16) -> Team {
        match doomednum {
            5080 => Team::Blue,
            5081 => Team::Red,
            5083 => Team::Green,
            _ => Team::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    SoulSphere,
    MegaSphere,
    BlueArmor,
    GreenArmor,
    Berserk,
    Stimpack,
    Medkit,
    HealthBonus,
    ArmorBonus,
    YellowKey,
    RedKey,
    BlueKey,
    YellowSkull,
    RedSkull,
    BlueSkull,
    InvulnSphere,
    InvisSphere,
    RadSuit,
    ComputerMap,
    Goggles,
    Clip,
    AmmoBox,
    Rocket,
    RocketBox,
    Cell,
    CellPack,
    Shells,
    ShellBox,
    Backpack,
    Bfg,
    Chaingun,
    Chainsaw,
    RocketLauncher,
    PlasmaGun,
    Shotgun,
    SuperShotgun,
    Unknown,
}

impl ItemKind {
    pub const ALL: [ItemKind; 37] = [
        ItemKind::SoulSphere,
        ItemKind::MegaSphere,
        ItemKind::BlueArmor,
        ItemKind::GreenArmor,
        ItemKind::Berserk,
        ItemKind::Stimpack,
        ItemKind::Medkit,
        ItemKind::HealthBonus,
        ItemKind::ArmorBonus,
        ItemKind::YellowKey,
        ItemKind::RedKey,
        ItemKind::BlueKey,
        ItemKind::YellowSkull,
        ItemKind::RedSkull,
        ItemKind::BlueSkull,
        ItemKind::InvulnSphere,
        ItemKind::InvisSphere,
        ItemKind::RadSuit,
        ItemKind::ComputerMap,
        ItemKind::Goggles,
        ItemKind::Clip,
        ItemKind::AmmoBox,
        ItemKind::Rocket,
        ItemKind::RocketBox,
        ItemKind::Cell,
        ItemKind::CellPack,
        ItemKind::Shells,
        ItemKind::ShellBox,
        ItemKind::Backpack,
        ItemKind::Bfg,
        ItemKind::Chaingun,
        ItemKind::Chainsaw,
        ItemKind::RocketLauncher,
        ItemKind::PlasmaGun,
        ItemKind::Shotgun,
        ItemKind::SuperShotgun,
        ItemKind::Unknown,
    ];

    /// Position in `ALL`, which is also the on-disk code.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> ItemKind {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(ItemKind::Unknown)
    }

    /// Item kind of a map thing, by editor number.
    ///
    /// Keys and skulls never respawn, so they are not listed and come out as
    /// `Unknown`; pickups of those pass their kind in explicitly.
    pub fn from_doomednum(doomednum: u16) -> ItemKind {
        match doomednum {
            2018 => ItemKind::GreenArmor,
            2019 => ItemKind::BlueArmor,
            2014 => ItemKind::HealthBonus,
            2015 => ItemKind::ArmorBonus,
            2011 => ItemKind::Stimpack,
            2012 => ItemKind::Medkit,
            2013 => ItemKind::SoulSphere,
            2022 => ItemKind::InvulnSphere,
            2023 => ItemKind::Berserk,
            2024 => ItemKind::InvisSphere,
            2025 => ItemKind::RadSuit,
            2026 => ItemKind::ComputerMap,
            2045 => ItemKind::Goggles,
            83 => ItemKind::MegaSphere,
            2007 => ItemKind::Clip,
            2048 => ItemKind::AmmoBox,
            2010 => ItemKind::Rocket,
            2046 => ItemKind::RocketBox,
            2047 => ItemKind::Cell,
            17 => ItemKind::CellPack,
            2008 => ItemKind::Shells,
            2049 => ItemKind::ShellBox,
            8 => ItemKind::Backpack,
            2006 => ItemKind::Bfg,
            2002 => ItemKind::Chaingun,
            2005 => ItemKind::Chainsaw,
            2003 => ItemKind::RocketLauncher,
            2004 => ItemKind::PlasmaGun,
            2001 => ItemKind::Shotgun,
            82 => ItemKind::SuperShotgun,
            _ => ItemKind::Unknown,
        }
    }
}

/// Cause of damage as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeansOfDeath {
    Unknown,
    Fist,
    Pistol,
    Shotgun,
    Chaingun,
    Rocket,
    RocketSplash,
    PlasmaRifle,
    BfgBoom,
    BfgSplash,
    Chainsaw,
    SuperShotgun,
    Water,
    Slime,
    Lava,
    Crush,
    Telefrag,
    Falling,
    Suicide,
    Barrel,
    Exit,
    Splash,
    Hit,
}

impl MeansOfDeath {
    const BY_CODE: [MeansOfDeath; 23] = [
        MeansOfDeath::Unknown,
        MeansOfDeath::Fist,
        MeansOfDeath::Pistol,
        MeansOfDeath::Shotgun,
        MeansOfDeath::Chaingun,
        MeansOfDeath::Rocket,
        MeansOfDeath::RocketSplash,
        MeansOfDeath::PlasmaRifle,
        MeansOfDeath::BfgBoom,
        MeansOfDeath::BfgSplash,
        MeansOfDeath::Chainsaw,
        MeansOfDeath::SuperShotgun,
        MeansOfDeath::Water,
        MeansOfDeath::Slime,
        MeansOfDeath::Lava,
        MeansOfDeath::Crush,
        MeansOfDeath::Telefrag,
        MeansOfDeath::Falling,
        MeansOfDeath::Suicide,
        MeansOfDeath::Barrel,
        MeansOfDeath::Exit,
        MeansOfDeath::Splash,
        MeansOfDeath::Hit,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> MeansOfDeath {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::BY_CODE.get(i).copied())
            .unwrap_or(MeansOfDeath::Unknown)
    }

    pub fn weapon(self) -> WeaponKind {
        match self {
            MeansOfDeath::Fist => WeaponKind::Fist,
            MeansOfDeath::Pistol => WeaponKind::Pistol,
            MeansOfDeath::Shotgun => WeaponKind::Shotgun,
            MeansOfDeath::Chaingun => WeaponKind::Chaingun,
            MeansOfDeath::Rocket | MeansOfDeath::RocketSplash => WeaponKind::Missile,
            MeansOfDeath::PlasmaRifle => WeaponKind::Plasma,
            MeansOfDeath::BfgBoom | MeansOfDeath::BfgSplash => WeaponKind::Bfg,
            MeansOfDeath::Chainsaw => WeaponKind::Chainsaw,
            MeansOfDeath::SuperShotgun => WeaponKind::SuperShotgun,
            _ => WeaponKind::Unknown,
        }
    }

    /// Most projectiles/pellets a single attack of this kind can land.
    /// Written as arg3 of accuracy records.
    pub fn max_shots(self) -> i32 {
        match self {
            MeansOfDeath::Shotgun => 7,
            MeansOfDeath::SuperShotgun => 20,
            MeansOfDeath::BfgSplash => 40,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Fist,
    Pistol,
    Shotgun,
    Chaingun,
    Missile,
    Plasma,
    Bfg,
    Chainsaw,
    SuperShotgun,
    Unknown,
}

impl WeaponKind {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_codes_follow_declaration_order() {
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            assert_eq!(kind.code(), i as i32);
            assert_eq!(ItemKind::from_code(i as i32), *kind);
        }
        assert_eq!(ItemKind::Unknown.code(), 36);
        assert_eq!(ItemKind::from_code(-1), ItemKind::Unknown);
        assert_eq!(ItemKind::from_code(99), ItemKind::Unknown);
    }

    #[test]
    fn doomednum_mapping_covers_respawnable_items() {
        let table: [(u16, ItemKind); 30] = [
            (2018, ItemKind::GreenArmor),
            (2019, ItemKind::BlueArmor),
            (2014, ItemKind::HealthBonus),
            (2015, ItemKind::ArmorBonus),
            (2011, ItemKind::Stimpack),
            (2012, ItemKind::Medkit),
            (2013, ItemKind::SoulSphere),
            (2022, ItemKind::InvulnSphere),
            (2023, ItemKind::Berserk),
            (2024, ItemKind::InvisSphere),
            (2025, ItemKind::RadSuit),
            (2026, ItemKind::ComputerMap),
            (2045, ItemKind::Goggles),
            (83, ItemKind::MegaSphere),
            (2007, ItemKind::Clip),
            (2048, ItemKind::AmmoBox),
            (2010, ItemKind::Rocket),
            (2046, ItemKind::RocketBox),
            (2047, ItemKind::Cell),
            (17, ItemKind::CellPack),
            (2008, ItemKind::Shells),
            (2049, ItemKind::ShellBox),
            (8, ItemKind::Backpack),
            (2006, ItemKind::Bfg),
            (2002, ItemKind::Chaingun),
            (2005, ItemKind::Chainsaw),
            (2003, ItemKind::RocketLauncher),
            (2004, ItemKind::PlasmaGun),
            (2001, ItemKind::Shotgun),
            (82, ItemKind::SuperShotgun),
        ];
        for (num, kind) in table {
            assert_eq!(ItemKind::from_doomednum(num), kind, "doomednum {}", num);
        }
        // Keys, monsters and decorations are not respawnable items.
        for num in [5u16, 13, 38, 3004, 2035, 1] {
            assert_eq!(ItemKind::from_doomednum(num), ItemKind::Unknown);
        }
    }

    #[test]
    fn means_of_death_maps_to_weapon() {
        let expected = [
            (MeansOfDeath::Unknown, WeaponKind::Unknown),
            (MeansOfDeath::Fist, WeaponKind::Fist),
            (MeansOfDeath::Pistol, WeaponKind::Pistol),
            (MeansOfDeath::Shotgun, WeaponKind::Shotgun),
            (MeansOfDeath::Chaingun, WeaponKind::Chaingun),
            (MeansOfDeath::Rocket, WeaponKind::Missile),
            (MeansOfDeath::RocketSplash, WeaponKind::Missile),
            (MeansOfDeath::PlasmaRifle, WeaponKind::Plasma),
            (MeansOfDeath::BfgBoom, WeaponKind::Bfg),
            (MeansOfDeath::BfgSplash, WeaponKind::Bfg),
            (MeansOfDeath::Chainsaw, WeaponKind::Chainsaw),
            (MeansOfDeath::SuperShotgun, WeaponKind::SuperShotgun),
        ];
        for (mod_, weapon) in expected {
            assert_eq!(mod_.weapon(), weapon);
        }
        for code in 12..=22 {
            assert_eq!(MeansOfDeath::from_code(code).weapon(), WeaponKind::Unknown);
        }
    }

    #[test]
    fn max_shots_per_means_of_death() {
        assert_eq!(MeansOfDeath::Shotgun.max_shots(), 7);
        assert_eq!(MeansOfDeath::SuperShotgun.max_shots(), 20);
        assert_eq!(MeansOfDeath::BfgSplash.max_shots(), 40);
        assert_eq!(MeansOfDeath::BfgBoom.max_shots(), 1);
        assert_eq!(MeansOfDeath::Chaingun.max_shots(), 1);
        assert_eq!(MeansOfDeath::Telefrag.max_shots(), 1);
    }

    #[test]
    fn means_of_death_codes_roundtrip() {
        for code in 0..23 {
            assert_eq!(MeansOfDeath::from_code(code).code(), code);
        }
        assert_eq!(MeansOfDeath::from_code(500), MeansOfDeath::Unknown);
    }

    #[test]
    fn team_codes() {
        assert_eq!(Team::from_code(Team::Red.code()), Some(Team::Red));
        assert_eq!(Team::from_code(Team::None.code()), Some(Team::None));
        assert_eq!(Team::from_code(42), None);
        assert_eq!(Team::from_code(-1), None);
        assert_eq!(Team::from_spawn_doomednum(5080), Team::Blue);
        assert_eq!(Team::from_spawn_doomednum(5081), Team::Red);
        assert_eq!(Team::from_spawn_doomednum(5083), Team::Green);
        assert_eq!(Team::from_spawn_doomednum(1), Team::None);
    }
}
