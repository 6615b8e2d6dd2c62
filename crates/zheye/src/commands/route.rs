//! `route` handler: runs the navigation guard for a page path.

use serde::Serialize;
use zheye_core::guard::{self, NavigationDecision};
use zheye_core::{NavigationGuard, Store};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RouteCheck<'a> {
    path: &'a str,
    route: Option<&'static str>,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

pub async fn handle(store: &Store, path: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let decision = NavigationGuard::new(store.clone()).navigate(path).await;
    let check = RouteCheck {
        path,
        route: guard::resolve(path).map(|r| r.name),
        allowed: decision == NavigationDecision::Allow,
        redirect: match decision {
            NavigationDecision::Allow => None,
            NavigationDecision::Redirect(to) => Some(to),
        },
    };

    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => match check.redirect {
            None => format!("allow {path}"),
            Some(to) => format!("redirect {path} -> {to}"),
        },
        _ => output::render_single(&global.output, &check, |_| String::new(), |_| String::new())?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
