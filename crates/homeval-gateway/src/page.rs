//! The single HTML page behind `/` and `/predict`.

use axum::response::{Html, IntoResponse, Response};
use homeval_core::types::{Feature, FeatureVector, Price};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Message shown above the form
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A successful prediction
    Prediction(Price),
    /// Input accepted but worth a second look
    Warning(String),
    /// Request failed
    Error(String),
}

impl Notice {
    /// Text as shown to the user
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Notice::Prediction(price) => format!("Predicted House Price: {price}"),
            Notice::Warning(msg) => format!("Warning: {msg}"),
            Notice::Error(msg) => format!("Error: {msg}"),
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Notice::Prediction(_) => "notice prediction",
            Notice::Warning(_) => "notice warning",
            Notice::Error(_) => "notice error",
        }
    }
}

/// Form page, optionally carrying a notice and the values to refill the form with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    notice: Option<Notice>,
    inputs: Option<FeatureVector>,
}

impl Page {
    /// Empty form
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form with a notice
    #[must_use]
    pub fn with_notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            inputs: None,
        }
    }

    /// Form with an error notice
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self::with_notice(Notice::Error(msg.into()))
    }

    /// Refill the form with previously submitted values
    #[must_use]
    pub fn with_inputs(mut self, inputs: FeatureVector) -> Self {
        self.inputs = Some(inputs);
        self
    }

    /// Render the page to HTML
    #[must_use]
    pub fn render(&self) -> String {
        let mut fields = String::new();
        for (i, feature) in Feature::ALL.iter().enumerate() {
            let value = self
                .inputs
                .map(|v| v.get(*feature).to_string())
                .unwrap_or_default();
            fields.push_str(&format!(
                concat!(
                    "      <label for=\"f{i}\">{label}</label>\n",
                    "      <input id=\"f{i}\" type=\"number\" step=\"any\" min=\"0\" ",
                    "name=\"{name}\" value=\"{value}\" required>\n"
                ),
                i = i,
                label = encode_text(feature.name()),
                name = encode_double_quoted_attribute(feature.name()),
                value = encode_double_quoted_attribute(&value),
            ));
        }

        let notice = self
            .notice
            .as_ref()
            .map(|n| {
                format!(
                    "    <div class=\"{}\">{}</div>\n",
                    n.css_class(),
                    encode_text(&n.text())
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>House Price Predictor</title>
    <style>
      body {{ font-family: sans-serif; max-width: 32rem; margin: 2rem auto; }}
      label {{ display: block; margin-top: 0.75rem; }}
      input {{ width: 100%; }}
      .notice {{ padding: 0.75rem; margin: 1rem 0; border-radius: 4px; }}
      .prediction {{ background: #e6f4ea; }}
      .warning {{ background: #fff4e5; }}
      .error {{ background: #fdecea; }}
    </style>
  </head>
  <body>
    <h1>House Price Predictor</h1>
{notice}    <form action="/predict" method="post">
{fields}      <button type="submit">Predict</button>
    </form>
  </body>
</html>
"#
        )
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_page_has_every_field() {
        let html = Page::blank().render();
        for feature in Feature::ALL {
            assert!(html.contains(&format!("name=\"{}\"", feature.name())));
        }
        assert!(html.contains("action=\"/predict\""));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(
            Notice::Prediction(Price::new(450_000.0)).text(),
            "Predicted House Price: $450,000"
        );
        assert_eq!(Notice::Warning("check".into()).text(), "Warning: check");
        assert_eq!(Notice::Error("boom".into()).text(), "Error: boom");
    }

    #[test]
    fn test_inputs_are_refilled() {
        let inputs = FeatureVector::new([5000.0, 5.5, 7.0, 4.0, 23086.8]).unwrap();
        let html = Page::with_notice(Notice::Warning("low".into()))
            .with_inputs(inputs)
            .render();

        assert!(html.contains("value=\"5000\""));
        assert!(html.contains("value=\"23086.8\""));
        assert!(html.contains("Warning: low"));
    }

    #[test]
    fn test_notice_is_escaped() {
        let html = Page::error("<script>alert(1)</script>").render();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
