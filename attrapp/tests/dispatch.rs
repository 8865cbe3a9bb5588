//! Dispatch semantics: first-match-wins ordering, toggles, fault isolation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use attrapp::testing::{CountingScript, FaultScript, ScriptTable, StaticScript};
use attrapp::{
    EntryToggle, FileEventKind, HandlerOutcome, ReplyParts, Request, ResponseBuilder,
    ScriptContext, ScriptHandler, ScriptRegistry, ScriptValue, ScriptsConfig,
};

mod common;
use common::{CtxProbeScript, SlowScript, registry_with, request};

#[tokio::test]
async fn first_matching_script_wins() {
    let table = Arc::new(ScriptTable::new());
    let first = CountingScript::declining();
    let third = CountingScript::answering(ReplyParts {
        content: "from-c".to_string(),
        ..ReplyParts::default()
    });

    table.insert("a.js", first.clone());
    table.insert("b.js", StaticScript::with_content("from-b"));
    table.insert("c.js", third.clone());

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("a.js"));
    registry.notify_file_event(FileEventKind::Created, Path::new("b.js"));
    registry.notify_file_event(FileEventKind::Created, Path::new("c.js"));

    let answer = registry.dispatch(&request("/api")).await;

    assert_eq!(answer.map(|a| a.content), Some("from-b".to_string()));
    assert_eq!(first.calls(), 1, "declining script should have been tried");
    assert_eq!(
        third.calls(),
        0,
        "entries after the first match must not be invoked"
    );
}

#[tokio::test]
async fn inactive_entries_are_skipped() {
    let table = Arc::new(ScriptTable::new());
    let would_answer = CountingScript::answering(ReplyParts::default());

    table.insert("a.js", would_answer.clone());
    table.insert("b.js", CountingScript::declining());

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("a.js"));
    registry.notify_file_event(FileEventKind::Created, Path::new("b.js"));
    registry.set_active([EntryToggle {
        file: "a.js".into(),
        active: false,
    }]);

    let answer = registry.dispatch(&request("/api")).await;

    assert!(answer.is_none(), "only a declining script was active");
    assert_eq!(would_answer.calls(), 0, "inactive entries must not run");
}

#[tokio::test]
async fn faulting_script_is_treated_as_a_decline() {
    let table = Arc::new(ScriptTable::new());
    table.insert("broken.js", FaultScript::new("boom"));
    table.insert("ok.js", StaticScript::with_content("still here"));

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("broken.js"));
    registry.notify_file_event(FileEventKind::Created, Path::new("ok.js"));

    let answer = registry.dispatch(&request("/api")).await;

    assert_eq!(answer.map(|a| a.content), Some("still here".to_string()));
}

#[tokio::test]
async fn empty_registry_misses() {
    let table = Arc::new(ScriptTable::new());
    let registry = registry_with(&table);

    assert!(registry.dispatch(&request("/api")).await.is_none());
}

#[tokio::test]
async fn disabled_registry_misses_without_running_scripts() {
    let table = Arc::new(ScriptTable::new());
    let script = CountingScript::answering(ReplyParts::default());
    table.insert("a.js", script.clone());

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("a.js"));
    registry.set_enabled(false);

    assert!(registry.dispatch(&request("/api")).await.is_none());
    assert_eq!(script.calls(), 0);

    registry.set_enabled(true);
    assert!(registry.dispatch(&request("/api")).await.is_some());
}

#[tokio::test]
async fn an_async_answer_is_awaited_before_later_entries() {
    let table = Arc::new(ScriptTable::new());
    let fallback = CountingScript::answering(ReplyParts::default());

    table.insert(
        "slow.js",
        SlowScript {
            delay: Duration::from_millis(20),
            content: "slow",
        },
    );
    table.insert("fast.js", fallback.clone());

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("slow.js"));
    registry.notify_file_event(FileEventKind::Created, Path::new("fast.js"));

    let answer = registry.dispatch(&request("/api")).await;

    assert_eq!(answer.map(|a| a.content), Some("slow".to_string()));
    assert_eq!(
        fallback.calls(),
        0,
        "dispatch must await a pending answer, not race ahead"
    );
}

#[tokio::test]
async fn context_mutations_do_not_leak_across_dispatches() {
    let table = Arc::new(ScriptTable::new());
    table.insert("probe.js", CtxProbeScript);

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("probe.js"));

    let first = registry.dispatch(&request("/one")).await;
    let second = registry.dispatch(&request("/two")).await;

    assert_eq!(first.map(|a| a.content), Some("false".to_string()));
    assert_eq!(
        second.map(|a| a.content),
        Some("false".to_string()),
        "a script's context copy must be fresh on every invocation"
    );
}

struct GreetingScript;

impl ScriptHandler for GreetingScript {
    async fn handle(
        &self,
        ctx: ScriptContext,
        _req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        let greeting = ctx
            .get("greeting")
            .and_then(ScriptValue::as_str)
            .unwrap_or("missing")
            .to_string();
        Ok(Some(builder.answer(ReplyParts {
            content: greeting,
            ..ReplyParts::default()
        })))
    }
}

#[tokio::test]
async fn extended_context_reaches_every_invocation() {
    let table = Arc::new(ScriptTable::new());
    table.insert("greet.js", GreetingScript);

    let mut extended = ScriptContext::new();
    extended.insert("greeting".to_string(), ScriptValue::from("hello"));

    let registry = ScriptRegistry::new(ScriptsConfig { extended }, table);
    registry.notify_file_event(FileEventKind::Created, Path::new("greet.js"));

    let answer = registry.dispatch(&request("/greet")).await;
    assert_eq!(answer.map(|a| a.content), Some("hello".to_string()));
}

#[tokio::test]
async fn answers_carry_provenance() {
    let table = Arc::new(ScriptTable::new());
    table.insert("hello.js", StaticScript::with_content("hi"));

    let registry = registry_with(&table);
    registry.notify_file_event(FileEventKind::Created, Path::new("hello.js"));

    let answer = registry
        .dispatch(&request("/greet"))
        .await
        .expect("script should answer");

    assert_eq!(answer.url, "/greet");
    let origin = answer.origin.expect("answer should be attributed");
    assert_eq!(origin.injector, registry.name());
    assert_eq!(origin.file, Path::new("hello.js"));
}
