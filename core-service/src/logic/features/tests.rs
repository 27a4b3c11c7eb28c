//! Encoding properties across the whole input space of a small layout.

#[cfg(test)]
mod encoding_tests {
    use crate::logic::features::{FeatureLayout, FeatureVector, FeatureVectorBuilder, SpeciesEncoder};

    const SYMPTOMS: [&str; 4] = ["Fever", "Vomiting", "Cough", "Lethargy"];

    fn layout() -> FeatureLayout {
        let mut columns = vec!["Pet_Type".to_string()];
        columns.extend(SYMPTOMS.iter().map(|s| s.to_string()));
        FeatureLayout::new(columns).unwrap()
    }

    fn subsets() -> Vec<Vec<&'static str>> {
        (1u32..(1 << SYMPTOMS.len()))
            .map(|mask| {
                SYMPTOMS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, s)| *s)
                    .collect()
            })
            .collect()
    }

    /// Every non-empty subset, every species: shape and content
    #[test]
    fn test_all_subsets_all_species() {
        let layout = layout();
        let encoder = SpeciesEncoder::fit(["Dog", "Cat", "Cow"]).unwrap();

        for species in encoder.classes() {
            let code = encoder.encode(species).unwrap();
            for subset in subsets() {
                let mut builder = FeatureVectorBuilder::new(&layout).species_code(code);
                for symptom in &subset {
                    builder = builder.symptom(symptom).unwrap();
                }
                let vector = builder.build();

                assert_eq!(vector.len(), layout.len());
                assert_eq!(vector.get(layout.species_index()), Some(code as f64));

                let ones = layout
                    .symptoms()
                    .filter(|s| vector.get_by_name(&layout, s) == Some(1.0))
                    .count();
                assert_eq!(ones, subset.len());

                for name in layout.symptoms() {
                    let expected = if subset.iter().any(|s| *s == name) { 1.0 } else { 0.0 };
                    assert_eq!(vector.get_by_name(&layout, name), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_repeated_builds_identical() {
        let layout = layout();
        let build = || {
            FeatureVectorBuilder::new(&layout)
                .species_code(2)
                .symptom("Cough")
                .unwrap()
                .symptom("Fever")
                .unwrap()
                .build()
        };
        let first = build();
        for _ in 0..10 {
            assert_eq!(build(), first);
        }
        assert_eq!(first.as_slice(), &[2.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_selection_order_irrelevant() {
        let layout = layout();
        let a = FeatureVectorBuilder::new(&layout)
            .symptom("Lethargy")
            .unwrap()
            .symptom("Fever")
            .unwrap()
            .build();
        let b = FeatureVectorBuilder::new(&layout)
            .symptom("Fever")
            .unwrap()
            .symptom("Lethargy")
            .unwrap()
            .build();
        assert_eq!(a, b);
        assert_eq!(a.active_symptoms(&layout), vec!["Fever", "Lethargy"]);
    }

    #[test]
    fn test_unknown_symptom_rejected() {
        let layout = layout();
        assert!(FeatureVectorBuilder::new(&layout).symptom("Sneezing").is_err());
        // Species column is not a symptom
        assert!(FeatureVectorBuilder::new(&layout).symptom("Pet_Type").is_err());
    }

    #[test]
    fn test_vector_validates_against_own_layout_only() {
        let layout = layout();
        let other = FeatureLayout::new(vec!["Pet_Type".into(), "Fever".into()]).unwrap();

        let vector = FeatureVector::zeroed(&layout);
        assert!(vector.validate(&layout).is_ok());
        assert!(vector.validate(&other).is_err());
    }

    #[test]
    fn test_out_of_range_set_ignored() {
        let layout = layout();
        let mut vector = FeatureVector::zeroed(&layout);
        vector.set(99, 1.0);
        assert!(vector.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_log_entry_names_values() {
        let layout = layout();
        let vector = FeatureVectorBuilder::new(&layout)
            .species_code(1)
            .symptom("Cough")
            .unwrap()
            .build();
        let entry = vector.to_log_entry(&layout);
        assert_eq!(entry["named_values"]["Cough"], 1.0);
        assert_eq!(entry["named_values"]["Pet_Type"], 1.0);
        assert_eq!(entry["layout_hash"], layout.hash());
    }
}
