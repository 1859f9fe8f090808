//! Machine type merge.

use azp_api::MachineType;
use std::collections::BTreeMap;

/// Merge spec machine types into status machine types.
///
/// Union by name only: a spec entry is added when its name is absent from
/// status, otherwise the status entry is kept as-is even when the fields
/// differ. Within one input, a repeated name is last-write-wins.
///
/// The result is sorted by type name.
pub fn merge_machine_types(
    spec_types: &[MachineType],
    status_types: &[MachineType],
) -> Vec<MachineType> {
    let spec_by_name: BTreeMap<&str, &MachineType> = spec_types
        .iter()
        .map(|machine_type| (machine_type.name.as_str(), machine_type))
        .collect();
    let mut merged: BTreeMap<&str, MachineType> = status_types
        .iter()
        .map(|machine_type| (machine_type.name.as_str(), machine_type.clone()))
        .collect();

    for (name, spec_type) in spec_by_name {
        merged.entry(name).or_insert_with(|| spec_type.clone());
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_type(name: &str, accelerated: Option<bool>) -> MachineType {
        MachineType {
            name: name.to_string(),
            accelerated_networking: accelerated,
        }
    }

    #[test]
    fn test_spec_only_type_added() {
        let spec = vec![machine_type("Standard_D4s_v5", Some(true))];
        let status = vec![machine_type("Standard_D2s_v5", None)];

        let merged = merge_machine_types(&spec, &status);

        assert_eq!(
            merged,
            vec![
                machine_type("Standard_D2s_v5", None),
                machine_type("Standard_D4s_v5", Some(true)),
            ]
        );
    }

    #[test]
    fn test_status_entry_wins() {
        let spec = vec![machine_type("Standard_D2s_v5", Some(true))];
        let status = vec![machine_type("Standard_D2s_v5", Some(false))];

        let merged = merge_machine_types(&spec, &status);

        assert_eq!(merged, vec![machine_type("Standard_D2s_v5", Some(false))]);
    }

    #[test]
    fn test_status_entry_wins_over_unset_field() {
        let spec = vec![machine_type("Standard_D2s_v5", Some(true))];
        let status = vec![machine_type("Standard_D2s_v5", None)];

        let merged = merge_machine_types(&spec, &status);

        assert_eq!(merged[0].accelerated_networking, None);
    }

    #[test]
    fn test_duplicate_name_in_spec_last_write_wins() {
        let spec = vec![
            machine_type("Standard_D2s_v5", Some(false)),
            machine_type("Standard_D2s_v5", Some(true)),
        ];

        let merged = merge_machine_types(&spec, &[]);

        assert_eq!(merged, vec![machine_type("Standard_D2s_v5", Some(true))]);
    }

    #[test]
    fn test_empty_inputs() {
        let types = vec![machine_type("a", None), machine_type("b", Some(true))];

        assert_eq!(merge_machine_types(&[], &types), types);
        assert_eq!(merge_machine_types(&types, &[]), types);
        assert!(merge_machine_types(&[], &[]).is_empty());
    }
}
