use crate::models::LicenseGroup;

const RULE_WIDTH: usize = 80;

/// Render a third-party notices document: each group lists its dependencies,
/// then the shared license content.
pub fn render(groups: &[LicenseGroup]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&rule);
            out.push_str("\n\n");
        }

        out.push_str("The following software may be included in this product:\n\n");
        for dep in &group.dependencies {
            out.push_str(" - ");
            out.push_str(dep);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(group.content.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_render_groups() {
        let groups = vec![
            LicenseGroup {
                content: "MIT License\n\nCopyright (c)\n\n".to_string(),
                dependencies: vec!["a@1.0.0".to_string(), "b@2.0.0".to_string()],
            },
            LicenseGroup {
                content: "(ISC)".to_string(),
                dependencies: vec!["c@3.0.0".to_string()],
            },
        ];

        let expected = format!(
            "The following software may be included in this product:\n\n \
- a@1.0.0\n - b@2.0.0\n\nMIT License\n\nCopyright (c)\n\n{}\n\n\
The following software may be included in this product:\n\n - c@3.0.0\n\n(ISC)\n",
            "-".repeat(80)
        );
        assert_eq!(render(&groups), expected);
    }
}
