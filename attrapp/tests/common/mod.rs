//! Shared fixtures for attrapp integration tests.

use std::sync::Arc;
use std::time::Duration;

use attrapp::testing::ScriptTable;
use attrapp::{
    HandlerOutcome, ReplyParts, Request, ResponseBuilder, ScriptCompiler, ScriptContext,
    ScriptHandler, ScriptRegistry, ScriptValue, ScriptsConfig,
};

/// A bare `GET` request to the given url.
pub fn request(url: &str) -> Request {
    Request::get(url)
}

/// A registry backed by the given stub compiler, with an empty extended
/// context.
pub fn registry_with(table: &Arc<ScriptTable>) -> ScriptRegistry {
    ScriptRegistry::new(ScriptsConfig::default(), Arc::clone(table) as Arc<dyn ScriptCompiler>)
}

/// A script that sleeps before answering, for asynchronous-answer tests.
pub struct SlowScript {
    /// How long to sleep before answering.
    pub delay: Duration,
    /// The answer body.
    pub content: &'static str,
}

impl ScriptHandler for SlowScript {
    async fn handle(
        &self,
        _ctx: ScriptContext,
        _req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        tokio::time::sleep(self.delay).await;
        Ok(Some(builder.answer(ReplyParts {
            content: self.content.to_string(),
            ..ReplyParts::default()
        })))
    }
}

/// A script that answers with whether the `seen` context key existed, then
/// sets it.
///
/// Two dispatches through the same registry must both answer `"false"`:
/// context mutations may not leak across invocations.
pub struct CtxProbeScript;

impl ScriptHandler for CtxProbeScript {
    async fn handle(
        &self,
        mut ctx: ScriptContext,
        _req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        let seen = ctx.contains_key("seen");
        ctx.insert("seen".to_string(), ScriptValue::Bool(true));
        Ok(Some(builder.answer(ReplyParts {
            content: seen.to_string(),
            ..ReplyParts::default()
        })))
    }
}
