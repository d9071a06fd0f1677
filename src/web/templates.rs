//! Template rendering with Tera

use crate::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Fragment templates
        tera.add_raw_template("form.html", include_str!("../templates/form.html"))?;
        tera.add_raw_template(
            "pagination.html",
            include_str!("../templates/pagination.html"),
        )?;
        tera.add_raw_template("results.html", include_str!("../templates/results.html"))?;

        // Demo page
        tera.add_raw_template("page.html", include_str!("../templates/page.html"))?;

        Ok(Self { tera })
    }

    /// Render a template with context
    pub fn render(&self, template: &str, context: &impl Serialize) -> Result<String> {
        let ctx = Context::from_serialize(context)?;
        self.render_with_context(template, &ctx)
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?.trim().to_string())
    }
}
