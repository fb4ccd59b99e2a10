use anyhow::Result;

use crate::models::LicenseGroup;

pub fn render(groups: &[LicenseGroup]) -> Result<String> {
    let mut body = serde_json::to_string_pretty(groups)?;
    body.push('\n');
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_shape() {
        let groups = vec![LicenseGroup {
            content: "(MIT)".to_string(),
            dependencies: vec!["a@1.0.0".to_string(), "b@2.0.0".to_string()],
        }];

        let value: serde_json::Value = serde_json::from_str(&render(&groups).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([{ "content": "(MIT)", "dependencies": ["a@1.0.0", "b@2.0.0"] }])
        );
    }
}
