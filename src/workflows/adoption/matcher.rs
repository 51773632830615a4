use super::domain::{AdoptionMatch, Dog, Shelter};

/// Scans every shelter for every dog and keeps the dogs with at least one
/// accepting shelter. Output preserves dog roster order; shelter names inside
/// each match preserve shelter roster order. Dogs with no accepting shelter
/// produce no entry at all.
pub fn find_matches(dogs: &[Dog], shelters: &[Shelter]) -> Vec<AdoptionMatch> {
    dogs.iter()
        .filter_map(|dog| {
            let suitable: Vec<String> = shelters
                .iter()
                .filter(|shelter| shelter.accepts(dog))
                .map(|shelter| shelter.name.clone())
                .collect();

            if suitable.is_empty() {
                None
            } else {
                Some(AdoptionMatch::new(dog.clone(), suitable))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::adoption::domain::AttributeRange;

    fn dog(name: &str, size: u32, age: u32, energy: u32) -> Dog {
        Dog {
            name: name.to_string(),
            size,
            age,
            energy,
        }
    }

    fn shelter(name: &str, size: (u32, u32), age: (u32, u32), energy: (u32, u32)) -> Shelter {
        Shelter {
            name: name.to_string(),
            size: AttributeRange::new(size.0, size.1),
            age: AttributeRange::new(age.0, age.1),
            energy: AttributeRange::new(energy.0, energy.1),
        }
    }

    #[test]
    fn excludes_shelters_failing_any_single_attribute() {
        let dogs = vec![dog("Rex", 3, 2, 4)];
        let shelters = vec![
            shelter("A", (1, 5), (0, 5), (1, 5)),
            shelter("B", (4, 5), (0, 5), (1, 5)),
        ];

        let matches = find_matches(&dogs, &shelters);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].dog.name, "Rex");
        assert_eq!(matches[0].shelters, vec!["A".to_string()]);
    }

    #[test]
    fn dogs_without_a_suitable_shelter_are_dropped() {
        let dogs = vec![dog("Rex", 3, 2, 4), dog("Titan", 5, 12, 5)];
        let shelters = vec![shelter("A", (1, 4), (0, 10), (1, 5))];

        let matches = find_matches(&dogs, &shelters);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].dog.name, "Rex");
    }

    #[test]
    fn shelter_order_follows_roster_order() {
        let dogs = vec![dog("Rex", 3, 2, 4)];
        let shelters = vec![
            shelter("Z Last", (1, 5), (0, 5), (1, 5)),
            shelter("A First", (1, 5), (0, 5), (1, 5)),
        ];

        let matches = find_matches(&dogs, &shelters);
        assert_eq!(
            matches[0].shelters,
            vec!["Z Last".to_string(), "A First".to_string()]
        );
    }

    #[test]
    fn match_order_follows_dog_roster_order() {
        let dogs = vec![dog("Bella", 1, 7, 2), dog("Rex", 3, 2, 4)];
        let shelters = vec![shelter("A", (1, 5), (0, 15), (1, 5))];

        let matches = find_matches(&dogs, &shelters);
        assert_eq!(matches[0].dog.name, "Bella");
        assert_eq!(matches[1].dog.name, "Rex");
    }

    #[test]
    fn single_point_range_matches_exact_value_only() {
        let dogs = vec![dog("Rex", 3, 2, 4), dog("Moose", 4, 2, 4)];
        let shelters = vec![shelter("Exact", (3, 3), (0, 5), (1, 5))];

        let matches = find_matches(&dogs, &shelters);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].dog.name, "Rex");
    }

    #[test]
    fn no_shelters_means_no_matches() {
        let dogs = vec![dog("Rex", 3, 2, 4)];
        assert!(find_matches(&dogs, &[]).is_empty());
    }

    #[test]
    fn matches_start_with_empty_responses() {
        let dogs = vec![dog("Rex", 3, 2, 4)];
        let shelters = vec![shelter("A", (1, 5), (0, 5), (1, 5))];

        let matches = find_matches(&dogs, &shelters);
        assert!(matches[0].responses.is_empty());
    }
}
