use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The closed set of muscles tracked by the fatigue and analytics
/// calculations. Used as the map key wherever fatigue, stimulus or
/// readiness is recorded per muscle.
#[derive(
    Clone, Copy, Debug, Display, EnumIter, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
    Deserialize,
)]
pub enum Muscle {
    Pecs,
    Traps,
    Lats,
    #[strum(serialize = "Front Delts")]
    FrontDelts,
    #[strum(serialize = "Side Delts")]
    SideDelts,
    #[strum(serialize = "Rear Delts")]
    RearDelts,
    Biceps,
    Triceps,
    Forearms,
    Abs,
    #[strum(serialize = "Erector Spinae")]
    ErectorSpinae,
    Glutes,
    Quads,
    Hamstrings,
    Calves,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_muscle_names_unique() {
        let mut names = HashSet::new();

        for muscle in Muscle::iter() {
            let name = muscle.to_string();

            assert!(!name.is_empty());
            assert!(!names.contains(&name));

            names.insert(name);
        }
    }

    #[test]
    fn test_muscle_serde_as_map_key() {
        let json = serde_json::to_string(&std::collections::BTreeMap::from([
            (Muscle::Quads, 1.0),
            (Muscle::ErectorSpinae, 0.5),
        ]))
        .unwrap();

        assert_eq!(json, r#"{"ErectorSpinae":0.5,"Quads":1.0}"#);
    }
}
