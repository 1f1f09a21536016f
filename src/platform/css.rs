use crate::{
    ast::Expression,
    evaluator::EvalError,
    platform::{Platform, PlatformOutput, camel_to_kebab},
    tokens_object::TokensObject,
};

/// Settings of the CSS generator.
#[derive(Debug, Clone, PartialEq)]
pub struct CssPlatformOptions {
    pub out_file_name: String,
    /// Prepended to custom property names: `--<prefix>-spacing-sm`
    pub variable_prefix: Option<String>,
    /// Prepended to composite token class names: `.<prefix>-heading`
    pub class_prefix: Option<String>,
}

impl Default for CssPlatformOptions {
    fn default() -> Self {
        CssPlatformOptions {
            out_file_name: "design-tokens.css".to_string(),
            variable_prefix: None,
            class_prefix: None,
        }
    }
}

/// Emits simple tokens as custom properties on `:root` and composite tokens
/// as one class each.
///
/// ```css
/// :root {
///     --spacing-sm: 4px;
/// }
///
/// .heading {
///     font-size: 16px;
///     font-weight: bold;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CssPlatform {
    options: CssPlatformOptions,
}

impl CssPlatform {
    pub fn new(options: CssPlatformOptions) -> Self {
        CssPlatform { options }
    }

    pub fn options(&self) -> &CssPlatformOptions {
        &self.options
    }

    fn variable_name(&self, path: &str) -> String {
        let path = path.strip_suffix(".value").unwrap_or(path);
        let name = camel_to_kebab(&path.replace('.', "-"));
        with_prefix(self.options.variable_prefix.as_deref(), name)
    }

    fn class_name(&self, path: &str) -> String {
        let mut parts: Vec<&str> = path.split('.').collect();
        // drop the member key and the `value` segment
        parts.truncate(parts.len().saturating_sub(2));
        with_prefix(self.options.class_prefix.as_deref(), parts.join("-"))
    }
}

fn with_prefix(prefix: Option<&str>, name: String) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}-{}", p, name),
        _ => name,
    }
}

fn path_of(expression: &Expression) -> &str {
    expression.path.as_deref().unwrap_or_default()
}

impl Platform for CssPlatform {
    fn name(&self) -> &str {
        "css"
    }

    fn run(&self, tokens: &TokensObject) -> Result<Vec<PlatformOutput>, EvalError> {
        let evaluator = tokens.evaluator();
        let mut variables: Vec<(String, String)> = Vec::new();
        let mut classes: Vec<(String, Vec<(String, String)>)> = Vec::new();

        for expression in tokens.expressions() {
            let value = evaluator.evaluate(expression)?.to_string();
            let path = path_of(expression);

            match expression.composite_key() {
                Some(key) => {
                    let class = self.class_name(path);
                    let declaration = (camel_to_kebab(key), value);
                    match classes.iter_mut().find(|(name, _)| *name == class) {
                        Some((_, declarations)) => declarations.push(declaration),
                        None => classes.push((class, vec![declaration])),
                    }
                }
                None => variables.push((self.variable_name(path), value)),
            }
        }

        let mut css = String::from(":root {\n");
        for (name, value) in &variables {
            css.push_str(&format!("    --{}: {};\n", name, value));
        }
        css.push_str("}\n");

        for (class, declarations) in &classes {
            css.push_str(&format!("\n.{} {{\n", class));
            for (property, value) in declarations {
                css.push_str(&format!("    {}: {};\n", property, value));
            }
            css.push_str("}\n");
        }

        tracing::debug!(
            variables = variables.len(),
            classes = classes.len(),
            "generated css"
        );

        Ok(vec![PlatformOutput {
            file_name: self.options.out_file_name.clone(),
            content: css,
        }])
    }
}
