use super::Template;

/// Standard-library HTTP server, no third-party dependencies.
pub struct NetHttp;

impl Template for NetHttp {
    fn name(&self) -> &str {
        "net/http"
    }

    fn description(&self) -> &str {
        "Standard library HTTP server"
    }

    fn files(&self, project_name: &str) -> Vec<(String, String)> {
        vec![(
            "main.go".to_string(),
            format!(
                r#"package main

import (
	"encoding/json"
	"fmt"
	"log"
	"net/http"
)

type Response struct {{
	Message string `json:"message"`
}}

func main() {{
	http.HandleFunc("/", handleRoot)
	http.HandleFunc("/ping", handlePing)

	fmt.Println("Server starting on :8080")
	if err := http.ListenAndServe(":8080", nil); err != nil {{
		log.Fatal(err)
	}}
}}

func handleRoot(w http.ResponseWriter, r *http.Request) {{
	w.Header().Set("Content-Type", "application/json")
	json.NewEncoder(w).Encode(Response{{
		Message: "Hello from {project_name}!",
	}})
}}

func handlePing(w http.ResponseWriter, r *http.Request) {{
	w.Header().Set("Content-Type", "application/json")
	json.NewEncoder(w).Encode(Response{{
		Message: "pong",
	}})
}}
"#
            ),
        )]
    }
}
