//! Tests for the certification registry and authorization predicate

#[cfg(test)]
mod tests {
    use crate::models::{
        all_cert_levels, can_view, cert_level, cert_levels_up_to, ServiceLine, CERT_LEVELS,
    };
    use std::str::FromStr;

    #[test]
    fn test_ranks_are_strictly_ordered() {
        for (expected, cert) in CERT_LEVELS.iter().enumerate() {
            assert_eq!(cert.level as usize, expected);
        }
    }

    #[test]
    fn test_rank_monotonicity() {
        // canView(viewer, content) must equal viewer >= content over the
        // whole grid
        for viewer in 0u8..=5 {
            for content in 0u8..=5 {
                assert_eq!(can_view(viewer, content), viewer >= content);
            }
        }
    }

    #[test]
    fn test_lookup_by_key() {
        let cct = cert_level("cct").unwrap();
        assert_eq!(cct.level, 4);
        assert_eq!(cct.label, "CCT");
        assert_eq!(cct.color, "#ef4444");

        assert!(cert_level("medicalControl").is_none());
        assert!(cert_level("").is_none());
    }

    #[test]
    fn test_all_levels_sorted() {
        let levels = all_cert_levels();
        assert_eq!(levels.len(), 6);
        assert!(levels.windows(2).all(|pair| pair[0].level < pair[1].level));
    }

    #[test]
    fn test_levels_up_to_rank() {
        let available = cert_levels_up_to(2);
        assert_eq!(
            available.iter().map(|cert| cert.value).collect::<Vec<_>>(),
            vec!["basic", "emt", "aemt"]
        );
        assert_eq!(cert_levels_up_to(5).len(), 6);
        assert_eq!(cert_levels_up_to(0).len(), 1);
    }

    #[test]
    fn test_service_line_ranks() {
        assert_eq!(ServiceLine::Bls.rank(), 1);
        assert_eq!(ServiceLine::Als.rank(), 3);
        assert_eq!(ServiceLine::Cct.rank(), 4);
    }

    #[test]
    fn test_service_line_parse() {
        assert_eq!(ServiceLine::from_str("ALS").unwrap(), ServiceLine::Als);
        assert_eq!(ServiceLine::from_str("CCT").unwrap(), ServiceLine::Cct);

        let err = ServiceLine::from_str("MICU").unwrap_err();
        assert!(err.to_string().contains("MICU"));
    }

    #[test]
    fn test_service_line_serde() {
        let line: ServiceLine = serde_json::from_str("\"BLS\"").unwrap();
        assert_eq!(line, ServiceLine::Bls);
        assert_eq!(serde_json::to_string(&ServiceLine::Cct).unwrap(), "\"CCT\"");
    }
}
