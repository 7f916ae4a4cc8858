use super::{BcError, BcResult, BoundaryKind, Marker, MarkerRegistry};
use json::JsonValue;
use std::fs::read_to_string;
#[cfg(feature = "json_export")]
use std::{fs::File, io::BufWriter};

impl MarkerRegistry {
    /// Construct a MarkerRegistry from a JSON file with the following format
    ///
    /// Each key is optional and holds the markers registered to that kind of boundary condition.
    ///
    /// bc.json
    /// ```JSON
    /// {
    ///     "essential": [1, 3],
    ///     "natural": [2],
    ///     "none": [5]
    /// }
    /// ```
    ///
    /// The registry is not validated; call [MarkerRegistry::check_consistency] afterwards.
    pub fn from_file(path: impl AsRef<str>) -> BcResult<Self> {
        let contents = read_to_string(path.as_ref())?;
        let bc = Self::from_json_str(&contents)?;

        log::debug!("loaded boundary markers from '{}'", path.as_ref());
        Ok(bc)
    }

    /// Construct a MarkerRegistry from the contents of a JSON document (see [MarkerRegistry::from_file])
    pub fn from_json_str(contents: &str) -> BcResult<Self> {
        let bc_json = json::parse(contents)
            .map_err(|err| BcError::config(format!("unable to parse as JSON ({})", err)))?;

        Self::from_json(&bc_json)
    }

    pub fn from_json(bc_json: &JsonValue) -> BcResult<Self> {
        if !bc_json.is_object() {
            return Err(BcError::config("expected a JSON object of marker arrays"));
        }

        for (key, _) in bc_json.entries() {
            if BoundaryKind::from_name(key).is_none() {
                return Err(BcError::config(format!(
                    "unknown boundary condition type '{}'",
                    key
                )));
            }
        }

        let mut bc = Self::new();
        for kind in BoundaryKind::ALL {
            let markers_json = &bc_json[kind.name()];
            if !markers_json.is_null() {
                bc.add(kind, parse_markers(kind, markers_json)?)?;
            }
        }

        Ok(bc)
    }

    /// Print the registered markers to a JSON file specified by path
    #[cfg(feature = "json_export")]
    pub fn export_to_json(&self, path: impl AsRef<str>) -> std::io::Result<()> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(&f);

        JsonValue::from(self).write_pretty(&mut w, 4)?;

        Ok(())
    }
}

#[cfg(feature = "json_export")]
impl From<&MarkerRegistry> for JsonValue {
    fn from(bc: &MarkerRegistry) -> Self {
        // empty buckets are left out, since an empty marker array is rejected on load
        let mut bc_json = JsonValue::new_object();
        for kind in BoundaryKind::ALL {
            let markers = bc.markers(kind);
            if !markers.is_empty() {
                bc_json[kind.name()] = JsonValue::from(markers.to_vec());
            }
        }
        bc_json
    }
}

fn parse_markers(kind: BoundaryKind, markers_json: &JsonValue) -> BcResult<Vec<Marker>> {
    if !markers_json.is_array() {
        return Err(BcError::config(format!(
            "{} markers must be an Array!",
            kind.name()
        )));
    }

    markers_json
        .members()
        .map(|marker_json| {
            marker_json.as_i32().ok_or_else(|| {
                BcError::config(format!(
                    "{} markers must be integers; found {}",
                    kind.name(),
                    marker_json.dump()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_from_file() {
        let bc = MarkerRegistry::from_file("./test_input/bc_heat_cubit.json").unwrap();
        bc.check_consistency().unwrap();

        assert_eq!(bc.get_type(1), BoundaryKind::Essential);
        assert_eq!(bc.get_type(2), BoundaryKind::Natural);
        assert_eq!(bc.get_type(3), BoundaryKind::Natural);
    }

    #[test]
    fn mismatched_file_loads_but_fails_validation() {
        let bc = MarkerRegistry::from_file("./test_input/bc_mismatched.json").unwrap();
        assert!(matches!(bc.check_consistency(), Err(BcError::Validation(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            MarkerRegistry::from_file("./test_input/does_not_exist.json"),
            Err(BcError::Io(_))
        ));
    }

    #[test]
    fn all_kinds_from_str() {
        let bc = MarkerRegistry::from_json_str(
            r#"{ "essential": [1, 3], "natural": [2], "none": [5] }"#,
        )
        .unwrap();

        assert_eq!(bc.markers(BoundaryKind::Essential), &[1, 3]);
        assert_eq!(bc.markers(BoundaryKind::Natural), &[2]);
        assert_eq!(bc.markers(BoundaryKind::None), &[5]);
    }

    #[test]
    fn omitted_kinds() {
        let bc = MarkerRegistry::from_json_str(r#"{ "none": [4] }"#).unwrap();
        assert!(bc.markers(BoundaryKind::Essential).is_empty());
        assert_eq!(bc.get_type(4), BoundaryKind::None);

        assert!(MarkerRegistry::from_json_str("{}").unwrap().is_empty());
    }

    #[test]
    fn empty_marker_array() {
        assert!(matches!(
            MarkerRegistry::from_json_str(r#"{ "essential": [] }"#),
            Err(BcError::EmptyMarkerSet {
                kind: BoundaryKind::Essential
            })
        ));
    }

    #[test]
    fn malformed_configurations() {
        for contents in [
            "not json",
            "[1, 2, 3]",
            r#"{ "essential": 1 }"#,
            r#"{ "natural": [1, "two"] }"#,
            r#"{ "dirichlet": [1] }"#,
        ] {
            assert!(
                matches!(
                    MarkerRegistry::from_json_str(contents),
                    Err(BcError::Config { .. })
                ),
                "'{}' should be rejected",
                contents
            );
        }
    }

    #[test]
    #[cfg(feature = "json_export")]
    fn json_round_trip() {
        let mut bc = MarkerRegistry::new();
        bc.add_essential([1, 3]).unwrap();
        bc.add_none([5]).unwrap();

        let bc_json = JsonValue::from(&bc);
        assert!(bc_json["natural"].is_null());

        let reloaded = MarkerRegistry::from_json(&bc_json).unwrap();
        assert_eq!(reloaded, bc);
    }

    #[test]
    #[cfg(feature = "json_export")]
    fn registry_to_file() {
        let bc = MarkerRegistry::from_file("./test_input/bc_heat_cubit.json").unwrap();
        std::fs::create_dir_all("./test_output").unwrap();
        bc.export_to_json("./test_output/bc_heat_cubit_copy.json")
            .unwrap();

        let reloaded = MarkerRegistry::from_file("./test_output/bc_heat_cubit_copy.json").unwrap();
        assert_eq!(reloaded, bc);
    }
}
