use happyman_deploy::Operation;

/// Render the available operations, one per line with its description.
pub fn run_markdown() -> happyman_deploy::Result<(String, i32)> {
    Ok((render(Operation::all()), 0))
}

fn render(operations: &[Operation]) -> String {
    let width = operations
        .iter()
        .map(|op| op.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Available commands:\n\n");
    for op in operations {
        out.push_str(&format!(
            "    {:<width$}  {}\n",
            op.name(),
            op.description(),
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_operation() {
        let (content, exit_code) = run_markdown().unwrap();

        assert_eq!(exit_code, 0);
        assert!(content.starts_with("Available commands:\n\n"));
        assert!(content.contains("    deploy   Pull the latest source"));
        assert!(content.contains("    restart  Restart the service"));
    }
}
