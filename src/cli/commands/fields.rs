use model::{FeatureKind, FeatureName};

pub fn list_fields() {
    print!("{}", render_fields());
}

/// One line per feature: wire name, form label and accepted values.
pub fn render_fields() -> String {
    FeatureName::ALL
        .into_iter()
        .map(|name| {
            let accepts = match name.kind() {
                FeatureKind::Choice(labels) => labels
                    .iter()
                    .map(|label| format!("{:?}", label))
                    .collect::<Vec<_>>()
                    .join(" | "),
                kind => kind.describe(),
            };
            format!("{:<28} {:<24} {}\n", name.as_str(), name.label(), accepts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_is_listed() {
        let rendered = render_fields();
        assert_eq!(rendered.lines().count(), model::FEATURE_COUNT);
        assert!(rendered.contains("\"No Deposit\" | \"Non Refundable\" | \"Refund\""));
        assert!(rendered.lines().any(|line| line.starts_with("adr ") && line.ends_with("a decimal number")));
    }
}
