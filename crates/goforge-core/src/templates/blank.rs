use super::Template;

/// Empty Go project: a single hello-world `main.go`.
pub struct Blank;

impl Template for Blank {
    fn name(&self) -> &str {
        "blank"
    }

    fn description(&self) -> &str {
        "Empty Go project"
    }

    fn files(&self, project_name: &str) -> Vec<(String, String)> {
        vec![(
            "main.go".to_string(),
            format!(
                r#"package main

import "fmt"

func main() {{
	fmt.Println("Hello from {project_name}!")
}}
"#
            ),
        )]
    }
}
