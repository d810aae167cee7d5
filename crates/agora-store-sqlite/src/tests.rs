//! Integration tests for `SqliteStore` and the argumentation service against
//! an in-memory database.

use std::sync::Arc;

use agora_core::{
  ArgumentId, ArgumentationService, Error as CoreError, StatementId,
  argument::NewArgument,
  service::RebuttalRequest,
  source::Source,
  statement::NewStatement,
  store::GraphStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn service(s: &SqliteStore) -> ArgumentationService<SqliteStore> {
  ArgumentationService::new(Arc::new(s.clone()))
}

async fn count(s: &SqliteStore, table: &'static str) -> i64 {
  s.conn
    .call(move |conn| {
      Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    })
    .await
    .unwrap()
}

/// The "Television" topic: one claim, its argument, two premises.
struct Graph {
  claim:    StatementId,
  argument: ArgumentId,
  premises: Vec<StatementId>,
}

async fn television(s: &SqliteStore) -> Graph {
  s.atomically(|tx| {
    let bbc = tx.put_source(&Source {
      name: "BBC".into(),
      text: Some("British Broadcasting Corporation".into()),
      url:  Some("https://www.bbc.co.uk".into()),
    })?;
    let claim = tx.insert_statement(NewStatement {
      text:              "Television is bad for children".into(),
      counter_statement: None,
      source:            Some(bbc.name.clone()),
    })?;
    let argument = tx.insert_argument(NewArgument {
      claim:  claim.id,
      source: Some(bbc.name),
    })?;

    let mut premises = Vec::new();
    for text in ["It shortens attention spans", "It displaces outdoor play"] {
      let premise = tx.insert_statement(NewStatement::new(text))?;
      tx.link_premise(argument.id, premise.id)?;
      premises.push(premise.id);
    }

    tx.insert_topic("Television", argument.id)?;
    Ok(Graph { claim: claim.id, argument: argument.id, premises })
  })
  .await
  .expect("seed graph")
}

fn rebut(target: StatementId, text: &str, source: Option<&str>) -> RebuttalRequest {
  RebuttalRequest {
    target_claim_id: Some(target),
    text:            Some(text.into()),
    source:          source.map(str::to_owned),
  }
}

// ─── Sources ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_or_create_source_is_idempotent() {
  let s = store().await;

  let first = s.get_or_create_source("User").await.unwrap();
  let second = s.get_or_create_source("User").await.unwrap();

  assert_eq!(first, second);
  assert_eq!(first, Source::named("User"));
  assert_eq!(count(&s, "sources").await, 1);
}

#[tokio::test]
async fn get_or_create_source_leaves_existing_row_untouched() {
  let s = store().await;
  television(&s).await;

  let bbc = s.get_or_create_source("BBC").await.unwrap();
  assert_eq!(bbc.text.as_deref(), Some("British Broadcasting Corporation"));
  assert_eq!(bbc.url.as_deref(), Some("https://www.bbc.co.uk"));
}

#[tokio::test]
async fn concurrent_get_or_create_yields_one_row() {
  let s = store().await;

  let (a, b, c) = tokio::join!(
    s.get_or_create_source("Alice"),
    s.get_or_create_source("Alice"),
    s.get_or_create_source("Alice"),
  );

  assert_eq!(a.unwrap(), b.unwrap());
  assert_eq!(c.unwrap().name, "Alice");
  assert_eq!(count(&s, "sources").await, 1);
}

#[tokio::test]
async fn get_source_missing_returns_none() {
  let s = store().await;
  assert!(s.get_source("Nobody").await.unwrap().is_none());
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_statement() {
  let s = store().await;

  let created = s
    .create_statement(NewStatement::new("Cats are better than dogs"))
    .await
    .unwrap();

  let fetched = s.get_statement(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert!(fetched.counter_statement.is_none());
  assert!(fetched.source.is_none());
}

#[tokio::test]
async fn get_statement_missing_returns_none() {
  let s = store().await;
  assert!(s.get_statement(StatementId(999_999)).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_statement_text_violates_check() {
  let s = store().await;
  let err = s.create_statement(NewStatement::new("   ")).await.unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
  assert_eq!(count(&s, "statements").await, 0);
}

#[tokio::test]
async fn statement_source_must_exist() {
  let s = store().await;
  let mut input = NewStatement::new("Unattributed claims are suspect");
  input.source = Some("Ghost".into());

  assert!(s.create_statement(input).await.is_err());
}

#[tokio::test]
async fn rebuttals_of_returns_direct_children_in_id_order() {
  let s = store().await;
  let root = s.create_statement(NewStatement::new("Root")).await.unwrap();

  let mut first = NewStatement::new("First rebuttal");
  first.counter_statement = Some(root.id);
  let first = s.create_statement(first).await.unwrap();

  let mut second = NewStatement::new("Second rebuttal");
  second.counter_statement = Some(root.id);
  let second = s.create_statement(second).await.unwrap();

  let mut nested = NewStatement::new("Rebuttal of the first rebuttal");
  nested.counter_statement = Some(first.id);
  s.create_statement(nested).await.unwrap();

  let ids: Vec<_> = s
    .rebuttals_of(root.id)
    .await
    .unwrap()
    .into_iter()
    .map(|st| st.id)
    .collect();
  assert_eq!(ids, vec![first.id, second.id]);
}

// ─── Arguments ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_argument_by_claim_prefers_lowest_id() {
  let s = store().await;
  let claim = s.create_statement(NewStatement::new("Shared claim")).await.unwrap();

  let a = s
    .create_argument(NewArgument { claim: claim.id, source: None })
    .await
    .unwrap();
  let b = s
    .create_argument(NewArgument { claim: claim.id, source: None })
    .await
    .unwrap();
  assert!(a.id < b.id);

  let all = s.arguments_by_claim(claim.id).await.unwrap();
  assert_eq!(all.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a.id, b.id]);

  let first = s.first_argument_by_claim(claim.id).await.unwrap().unwrap();
  assert_eq!(first.id, a.id);
}

#[tokio::test]
async fn argument_claim_must_exist() {
  let s = store().await;
  let err = s
    .create_argument(NewArgument { claim: StatementId(42), source: None })
    .await;
  assert!(err.is_err());
  assert_eq!(count(&s, "arguments").await, 0);
}

// ─── Premises & topics ───────────────────────────────────────────────────────

#[tokio::test]
async fn premises_and_topics_resolve() {
  let s = store().await;
  let graph = television(&s).await;

  let premises: Vec<_> = s
    .premises_of(graph.argument)
    .await
    .unwrap()
    .into_iter()
    .map(|st| st.id)
    .collect();
  assert_eq!(premises, graph.premises);

  let topic = s.find_topic("Television").await.unwrap().unwrap();
  assert_eq!(topic.argument, graph.argument);
  assert!(s.find_topic("Radio").await.unwrap().is_none());

  let topics = s.list_topics().await.unwrap();
  assert_eq!(topics.len(), 1);
  assert_eq!(topics[0].name, "Television");
}

#[tokio::test]
async fn linking_a_premise_twice_is_a_noop() {
  let s = store().await;
  let graph = television(&s).await;
  let premise = graph.premises[0];

  s.atomically(move |tx| tx.link_premise(graph.argument, premise))
    .await
    .unwrap();

  assert_eq!(count(&s, "premises").await, 2);
}

// ─── Unit of work ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_unit_of_work_rolls_back_every_write() {
  let s = store().await;

  let err = s
    .atomically(|tx| {
      tx.get_or_create_source("Alice")?;
      let st = tx.insert_statement(NewStatement::new("Doomed"))?;
      Err::<(), _>(CoreError::StatementNotFound(st.id))
    })
    .await
    .unwrap_err();

  assert!(matches!(err, crate::Error::Core(CoreError::StatementNotFound(_))));
  assert_eq!(count(&s, "sources").await, 0);
  assert_eq!(count(&s, "statements").await, 0);
}

// ─── Service: createRebuttal ─────────────────────────────────────────────────

#[tokio::test]
async fn create_rebuttal_points_new_statement_at_target() {
  let s = store().await;
  let graph = television(&s).await;

  let rebuttal = service(&s)
    .create_rebuttal(rebut(graph.claim, "  No it isn't  ", Some("Alice")))
    .await
    .unwrap();

  assert_eq!(rebuttal.text, "No it isn't");
  assert_eq!(rebuttal.source.as_deref(), Some("Alice"));
  assert_ne!(rebuttal.statement_id, graph.claim);
  assert!(!graph.premises.contains(&rebuttal.statement_id));

  let stored = s.get_statement(rebuttal.statement_id).await.unwrap().unwrap();
  assert_eq!(stored.counter_statement, Some(graph.claim));
  assert_eq!(stored.source.as_deref(), Some("Alice"));

  let argument = s
    .get_argument(rebuttal.argument_id.unwrap())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(argument.claim, rebuttal.statement_id);
  assert_eq!(argument.source.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn create_rebuttal_defaults_source_to_user() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  for source in [None, Some(""), Some("   ")] {
    let rebuttal = svc
      .create_rebuttal(rebut(graph.claim, "Not for everyone", source))
      .await
      .unwrap();
    assert_eq!(rebuttal.source.as_deref(), Some("User"));
  }

  // BBC from the seed plus exactly one "User".
  assert_eq!(count(&s, "sources").await, 2);
}

#[tokio::test]
async fn create_rebuttal_issues_fresh_ids() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  let a = svc.create_rebuttal(rebut(graph.claim, "One", None)).await.unwrap();
  let b = svc.create_rebuttal(rebut(graph.claim, "Two", None)).await.unwrap();
  let c = svc
    .create_rebuttal(rebut(a.statement_id, "Three", None))
    .await
    .unwrap();

  let ids = [a.statement_id, b.statement_id, c.statement_id];
  assert!(ids.windows(2).all(|w| w[0] < w[1]));
  assert_ne!(a.argument_id, b.argument_id);

  let nested = s.get_statement(c.statement_id).await.unwrap().unwrap();
  assert_eq!(nested.counter_statement, Some(a.statement_id));
}

#[tokio::test]
async fn create_rebuttal_unknown_target_writes_nothing() {
  let s = store().await;
  television(&s).await;
  let (statements, arguments, sources) = (
    count(&s, "statements").await,
    count(&s, "arguments").await,
    count(&s, "sources").await,
  );

  let err = service(&s)
    .create_rebuttal(rebut(StatementId(999_999), "No it isn't", Some("Alice")))
    .await
    .unwrap_err();

  assert!(matches!(err, CoreError::StatementNotFound(StatementId(999_999))));
  assert_eq!(count(&s, "statements").await, statements);
  assert_eq!(count(&s, "arguments").await, arguments);
  assert_eq!(count(&s, "sources").await, sources);
}

#[tokio::test]
async fn create_rebuttal_rejects_missing_or_blank_fields() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  for text in ["", "   "] {
    let err = svc
      .create_rebuttal(rebut(graph.claim, text, None))
      .await
      .unwrap_err();
    assert!(matches!(err, CoreError::Invalid(_)), "{text:?}");
  }

  let missing_target = RebuttalRequest {
    text: Some("Orphan".into()),
    ..Default::default()
  };
  assert!(matches!(
    svc.create_rebuttal(missing_target).await,
    Err(CoreError::Invalid(_))
  ));

  let missing_text = RebuttalRequest {
    target_claim_id: Some(graph.claim),
    ..Default::default()
  };
  assert!(matches!(
    svc.create_rebuttal(missing_text).await,
    Err(CoreError::Invalid(_))
  ));

  assert!(s.rebuttals_of(graph.claim).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rebuttal_rolls_back_statement_when_argument_insert_fails() {
  let s = store().await;
  let root = s.create_statement(NewStatement::new("Root")).await.unwrap();

  s.conn
    .call(|conn| Ok(conn.execute_batch("DROP TABLE arguments")?))
    .await
    .unwrap();

  let err = service(&s)
    .create_rebuttal(rebut(root.id, "Never persisted", Some("Alice")))
    .await
    .unwrap_err();

  assert!(matches!(err, CoreError::Storage(_)));
  assert_eq!(count(&s, "statements").await, 1);
  assert_eq!(count(&s, "sources").await, 0);
}

// ─── Service: listRebuttalsForTarget ─────────────────────────────────────────

#[tokio::test]
async fn created_rebuttal_appears_in_listing() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  let created = svc
    .create_rebuttal(rebut(graph.claim, "No it isn't", Some("Alice")))
    .await
    .unwrap();

  let listed = svc.rebuttals_for(graph.claim).await.unwrap();
  assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn listing_tolerates_rebuttals_without_an_argument() {
  let s = store().await;
  let graph = television(&s).await;

  let mut legacy = NewStatement::new("Legacy counterpoint");
  legacy.counter_statement = Some(graph.claim);
  let legacy = s.create_statement(legacy).await.unwrap();

  let listed = service(&s).rebuttals_for(graph.claim).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].statement_id, legacy.id);
  assert!(listed[0].argument_id.is_none());
  assert!(listed[0].source.is_none());
}

#[tokio::test]
async fn listing_unknown_target_is_empty() {
  let s = store().await;
  let listed = service(&s).rebuttals_for(StatementId(7)).await.unwrap();
  assert!(listed.is_empty());
}

// ─── Service: lookups ────────────────────────────────────────────────────────

#[tokio::test]
async fn root_claim_by_topic_name() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  let claim = svc.root_claim("Television").await.unwrap();
  assert_eq!(claim.id, graph.claim);
  assert_eq!(claim.text, "Television is bad for children");
  assert_eq!(claim.source.as_deref(), Some("BBC"));

  let err = svc.root_claim("Radio").await.unwrap_err();
  assert!(matches!(err, CoreError::TopicNotFound(ref name) if name == "Radio"));
}

#[tokio::test]
async fn justifications_for_argument() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  let premises = svc.justifications(graph.argument).await.unwrap();
  assert_eq!(premises.iter().map(|p| p.id).collect::<Vec<_>>(), graph.premises);
  assert!(premises.iter().all(|p| p.source.is_none()));

  let err = svc.justifications(ArgumentId(404)).await.unwrap_err();
  assert!(matches!(err, CoreError::ArgumentNotFound(ArgumentId(404))));
}

#[tokio::test]
async fn justifications_without_premises_is_empty() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  let rebuttal = svc
    .create_rebuttal(rebut(graph.claim, "Educational shows exist", None))
    .await
    .unwrap();

  let premises = svc
    .justifications(rebuttal.argument_id.unwrap())
    .await
    .unwrap();
  assert!(premises.is_empty());
}

#[tokio::test]
async fn argument_id_by_claim() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);

  assert_eq!(svc.argument_id_by_claim(graph.claim).await.unwrap(), graph.argument);

  // A premise is a statement no argument claims.
  let err = svc.argument_id_by_claim(graph.premises[0]).await.unwrap_err();
  assert!(matches!(err, CoreError::UnclaimedStatement(_)));
}

#[tokio::test]
async fn read_only_lookups_are_repeatable() {
  let s = store().await;
  let graph = television(&s).await;
  let svc = service(&s);
  svc
    .create_rebuttal(rebut(graph.claim, "Counterpoint", None))
    .await
    .unwrap();

  assert_eq!(svc.topics().await.unwrap(), svc.topics().await.unwrap());
  assert_eq!(
    svc.justifications(graph.argument).await.unwrap(),
    svc.justifications(graph.argument).await.unwrap()
  );
  assert_eq!(
    svc.rebuttals_for(graph.claim).await.unwrap(),
    svc.rebuttals_for(graph.claim).await.unwrap()
  );
}
