use anyhow::Result;
use mc_config::MockCondConfig;
use mc_core::{ConditionSet, ExecutionContext, RequestContext};

/// Parse `Name: value`.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse `key=value`.
pub fn parse_query(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Condition text from `--expr` arguments. Arguments already starting with
/// `>` are taken as written, anything else becomes an AND line.
pub fn block_from_exprs(exprs: &[String]) -> String {
    exprs
        .iter()
        .map(|e| {
            if e.trim_start().starts_with('>') {
                e.clone()
            } else {
                format!("> {e}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The simulated request a block is evaluated against.
pub struct RequestSpec {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestSpec {
    pub fn build(self) -> RequestContext {
        let mut req = RequestContext::new(self.method, self.path);
        for (name, value) in self.headers {
            req.insert_header(&name, value);
        }
        for (key, value) in self.query {
            req = req.with_query(key, value);
        }
        if let Some(body) = self.body {
            req = req.with_body_json(&body);
        }
        req
    }
}

/// Outcome of one simulated request.
#[derive(Debug)]
pub struct EvalReport {
    pub matched: bool,
    pub bindings: Vec<(String, String)>,
}

/// Compile `text` and run it once. Runtime errors follow `[eval] on_error`.
pub fn evaluate_text(
    text: &str,
    request: RequestContext,
    call_count: u64,
    seed: Option<u64>,
    config: &MockCondConfig,
) -> Result<EvalReport> {
    let set = ConditionSet::compile_with(text, &config.lexer).map_err(|e| anyhow::anyhow!("{e}"))?;
    let mut ctx = match seed {
        Some(seed) => ExecutionContext::seeded(call_count, request, seed),
        None => ExecutionContext::from_config(call_count, request, &config.eval),
    };
    let matched = set
        .decide(&mut ctx, config.eval.on_error)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut bindings: Vec<(String, String)> = ctx
        .variables()
        .iter()
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect();
    bindings.sort();
    Ok(EvalReport { matched, bindings })
}

pub fn print_report(report: &EvalReport) {
    println!("{}", if report.matched { "match" } else { "no match" });
    for (name, value) in &report.bindings {
        println!("  {name} = {value}");
    }
}

#[cfg(test)]
mod tests {
    use mc_config::OnError;

    use super::*;

    fn request() -> RequestSpec {
        RequestSpec {
            method: "POST".to_string(),
            path: "/login".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer abc".to_string())],
            query: vec![("page".to_string(), "2".to_string())],
            body: Some(r#"{"user": "ada"}"#.to_string()),
        }
    }

    #[test]
    fn header_and_query_arguments() {
        assert_eq!(
            parse_header("X-Debug: 1").unwrap(),
            ("X-Debug".to_string(), "1".to_string())
        );
        assert!(parse_header("nocolon").is_err());
        assert!(parse_header(": v").is_err());
        assert_eq!(
            parse_query("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn exprs_become_and_lines() {
        let exprs = vec!["call_count > 1".to_string(), "> or True".to_string()];
        assert_eq!(block_from_exprs(&exprs), "> call_count > 1\n> or True");
    }

    #[test]
    fn evaluates_against_simulated_request() {
        let text = "> headers[\"authorization\"].split \" \" >> scheme, token\n> body.user == \"ada\"\n> query.page == \"2\"";
        let report =
            evaluate_text(text, request().build(), 1, Some(1), &MockCondConfig::default()).unwrap();
        assert!(report.matched);
        assert_eq!(
            report.bindings,
            vec![
                ("scheme".to_string(), "Bearer".to_string()),
                ("token".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn on_error_policy_applies() {
        let mut config = MockCondConfig::default();
        let report = evaluate_text("> 1 // 0 == 1", request().build(), 1, None, &config).unwrap();
        assert!(!report.matched);

        config.eval.on_error = OnError::Fail;
        assert!(evaluate_text("> 1 // 0 == 1", request().build(), 1, None, &config).is_err());
    }

    #[test]
    fn compile_errors_surface() {
        let err = evaluate_text("> .nope", request().build(), 1, None, &MockCondConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("condition semantic error"));
    }
}
