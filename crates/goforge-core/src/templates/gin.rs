use super::Template;

/// Gin web service with a JSON root handler and a ping route.
pub struct Gin;

impl Template for Gin {
    fn name(&self) -> &str {
        "gin"
    }

    fn description(&self) -> &str {
        "Gin Web Framework"
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["github.com/gin-gonic/gin".to_string()]
    }

    fn files(&self, project_name: &str) -> Vec<(String, String)> {
        vec![(
            "main.go".to_string(),
            format!(
                r#"package main

import (
	"github.com/gin-gonic/gin"
)

func main() {{
	r := gin.Default()

	r.GET("/", func(c *gin.Context) {{
		c.JSON(200, gin.H{{
			"message": "Hello from {project_name}!",
		}})
	}})

	r.GET("/ping", func(c *gin.Context) {{
		c.JSON(200, gin.H{{
			"message": "pong",
		}})
	}})

	r.Run(":8080")
}}
"#
            ),
        )]
    }
}
