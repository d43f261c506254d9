use super::Template;

/// Fiber web service rendering an HTML view.
pub struct Fiber;

impl Template for Fiber {
    fn name(&self) -> &str {
        "fiber"
    }

    fn description(&self) -> &str {
        "Fiber web framework with HTML templates"
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            "github.com/gofiber/fiber/v2".to_string(),
            "github.com/gofiber/template/html/v2".to_string(),
        ]
    }

    fn files(&self, project_name: &str) -> Vec<(String, String)> {
        vec![
            (
                "main.go".to_string(),
                format!(
                    r#"package main

import (
	"log"

	"github.com/gofiber/fiber/v2"
	"github.com/gofiber/template/html/v2"
)

func main() {{
	engine := html.New("./views", ".html")
	app := fiber.New(fiber.Config{{
		Views: engine,
	}})

	app.Get("/", func(c *fiber.Ctx) error {{
		return c.Render("index", fiber.Map{{
			"Title":   "Hello from {project_name}",
			"Message": "Fiber is running!",
		}})
	}})

	if err := app.Listen(":8080"); err != nil {{
		log.Fatal(err)
	}}
}}
"#
                ),
            ),
            (
                "views/index.html".to_string(),
                r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{.Title}}</title>
</head>
<body>
  <h1>{{.Title}}</h1>
  <p>{{.Message}}</p>
</body>
</html>
"#
                .to_string(),
            ),
        ]
    }
}
