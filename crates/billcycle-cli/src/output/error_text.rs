use billcycle_engine::EngineError;

pub fn render_error(error: &EngineError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    if let Some(issues) = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(|issues| issues.as_array())
    {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        for issue in issues {
            lines.push(format!(
                "  row {}  {}: {}",
                issue["row"],
                issue["field"].as_str().unwrap_or("?"),
                issue["description"].as_str().unwrap_or("")
            ));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
