use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use question_bulk_import::error::{AppError, AppResult};
use question_bulk_import::import::parse_bulk;
use question_bulk_import::models::{MessageKind, QuestionFormat};
use question_bulk_import::{
    App, BulkParseOutcome, Config, ImportSession, Question, QuestionDraft, QuestionStore,
    SubmitEvent, TargetRole,
};
use tokio_test::{assert_err, assert_ok};

/// 共享状态的内存题库，`fail_texts` 中的题干创建失败
#[derive(Clone, Default)]
struct FakeStore {
    questions: Arc<Mutex<Vec<Question>>>,
    fail_texts: Arc<HashSet<String>>,
}

impl FakeStore {
    fn with_existing(texts: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut questions = store.questions.lock().unwrap();
            for (i, text) in texts.iter().enumerate() {
                questions.push(Question {
                    id: format!("seed-{}", i),
                    text: text.to_string(),
                    question_type: String::new(),
                    format: QuestionFormat::Text,
                    required: true,
                    options: Vec::new(),
                    target_role: "backend".to_string(),
                    created_at: None,
                });
            }
        }
        store
    }

    fn failing(mut self, texts: &[&str]) -> Self {
        self.fail_texts = Arc::new(texts.iter().map(|t| t.to_string()).collect());
        self
    }

    fn texts(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.text.clone())
            .collect()
    }
}

impl QuestionStore for FakeStore {
    fn create_question<'a>(
        &'a self,
        draft: &'a QuestionDraft,
        role: &'a TargetRole,
    ) -> BoxFuture<'a, AppResult<Question>> {
        async move {
            if self.fail_texts.contains(&draft.text) {
                return Err(AppError::bad_response("/rest/v1/questions", 503, None));
            }
            let mut questions = self.questions.lock().unwrap();
            let question = Question {
                id: format!("q-{}", questions.len() + 1),
                text: draft.text.clone(),
                question_type: draft.question_type.clone(),
                format: draft.format,
                required: draft.required,
                options: draft.options.clone(),
                target_role: role.to_string(),
                created_at: Some(chrono::Utc::now()),
            };
            questions.push(question.clone());
            Ok(question)
        }
        .boxed()
    }

    fn list_questions<'a>(&'a self, _role: &'a TargetRole) -> BoxFuture<'a, AppResult<Vec<Question>>> {
        async move { Ok(self.questions.lock().unwrap().clone()) }.boxed()
    }
}

/// 忽略选项 ID 后的草稿摘要
fn shape(outcome: &BulkParseOutcome) -> Vec<(String, QuestionFormat, bool, Vec<String>)> {
    outcome
        .items
        .iter()
        .map(|item| {
            (
                item.draft.text.clone(),
                item.draft.format,
                item.draft.required,
                item.draft
                    .option_texts()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            )
        })
        .collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name))
}

const NONE: &[&str] = &[];

#[test]
fn test_header_and_default_order_yield_same_drafts() {
    let with_header = "format,question,options,required\n\
                       text,Tell me about yourself,,\n\
                       multiple_choice,Preferred stack?,Rust|Go,no";
    let without_header = "text,Tell me about yourself,,\n\
                          multiple_choice,Preferred stack?,Rust|Go,no";

    let a = parse_bulk(with_header, NONE);
    let b = parse_bulk(without_header, NONE);

    assert!(a.header_detected);
    assert!(!b.header_detected);
    assert_eq!(shape(&a), shape(&b));
}

#[test]
fn test_reordered_header_matches_default_order() {
    let reordered = "Required,Choices,Text,Format\n\
                     no,Rust|Go,Preferred stack?,mcq";
    let positional = "mcq,Preferred stack?,Rust|Go,no";
    assert_eq!(
        shape(&parse_bulk(reordered, NONE)),
        shape(&parse_bulk(positional, NONE))
    );
}

#[test]
fn test_parse_is_idempotent() {
    let input = "question,format,options\n\
                 Why us?,text,\n\
                 Pick one,mcq,A\n\
                 Pick two,mcq,A|B\n\
                 why us?,text,";
    let existing = ["Pick two"];

    let first = parse_bulk(input, &existing);
    let second = parse_bulk(input, &existing);

    assert_eq!(shape(&first), shape(&second));
    assert_eq!(first.messages, second.messages);
    assert_eq!(first.items.len(), 1);
    assert_eq!(first.error_count(), 3);
}

#[test]
fn test_mcq_defaults_to_required() {
    let outcome = parse_bulk("multiple_choice,Pick,A|B,", NONE);
    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].draft.options.len(), 2);
    assert!(outcome.items[0].draft.required);
    assert!(outcome.items[0].draft.is_consistent());
}

#[tokio::test]
async fn test_end_to_end_partial_failure() {
    // 3 行有效 + 1 行无效；其中 1 行后端创建失败
    let input = "format,question,options,required\n\
                 text,Tell me about a failure,,\n\
                 mcq,Only one option,A,\n\
                 mcq,Preferred stack?,Rust|Go,\n\
                 text,Why do you want to join?,,no";

    let store = FakeStore::default().failing(&["Preferred stack?"]);
    let role = TargetRole::new("backend").unwrap();

    let mut session = ImportSession::new();
    assert_eq!(session.load::<&str>(input, &[]), 3);
    assert!(session
        .messages()
        .iter()
        .any(|m| m.kind == MessageKind::Error && m.row == Some(3)));

    let mut created_rows = Vec::new();
    let outcome = session
        .submit(&store, Some(&role), |event| {
            if let SubmitEvent::Created { row, .. } = event {
                created_rows.push(row);
            }
        })
        .await
        .expect("前置条件满足");

    assert_eq!(outcome.success_count(), 2);
    assert_eq!(created_rows, vec![2, 5]);
    assert_eq!(session.items().len(), 1);
    assert_eq!(session.items()[0].row, 4);
    assert_eq!(
        store.texts(),
        vec!["Tell me about a failure", "Why do you want to join?"]
    );
    // 无效行从未进入提交流程
    assert!(!store.texts().contains(&"Only one option".to_string()));
}

#[tokio::test]
async fn test_app_run_writes_retry_file() {
    let input_path = temp_path("questions.csv");
    let retry_path = temp_path("questions.retry.csv");
    let log_path = temp_path("import_log.txt");

    tokio::fs::write(
        &input_path,
        "question,format,options\n\
         Tell me about yourself,text,\n\
         New question,text,\n\
         Broken question,text,\n\
         Pick,mcq,A|B",
    )
    .await
    .unwrap();

    let store = FakeStore::with_existing(&["tell me about yourself"]).failing(&["Broken question"]);
    let config = Config {
        target_role: "backend".to_string(),
        input_file: input_path.display().to_string(),
        retry_file: retry_path.display().to_string(),
        output_log_file: log_path.display().to_string(),
        ..Config::default()
    };

    let app = App::with_store(config, Box::new(store.clone()));
    let stats = assert_ok!(app.run().await);

    assert_eq!(stats.parsed, 3);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.created, 2);
    assert_eq!(stats.failed, 1);

    let retry = tokio::fs::read_to_string(&retry_path).await.unwrap();
    assert_eq!(
        retry,
        "format,question,type,options,required\ntext,Broken question,,,true\n"
    );

    let log = tokio::fs::read_to_string(&log_path).await.unwrap();
    assert!(log.contains("创建失败"));

    for path in [input_path, retry_path, log_path] {
        let _ = tokio::fs::remove_file(path).await;
    }
}

#[tokio::test]
async fn test_app_dry_run_submits_nothing() {
    let input_path = temp_path("questions.txt");
    let log_path = temp_path("import_log.txt");
    tokio::fs::write(&input_path, "text,Why us?,,").await.unwrap();

    let store = FakeStore::default();
    let config = Config {
        target_role: "backend".to_string(),
        input_file: input_path.display().to_string(),
        output_log_file: log_path.display().to_string(),
        dry_run: true,
        ..Config::default()
    };

    let stats = assert_ok!(App::with_store(config, Box::new(store.clone())).run().await);
    assert_eq!(stats.parsed, 1);
    assert_eq!(stats.created, 0);
    assert!(store.texts().is_empty());

    for path in [input_path, log_path] {
        let _ = tokio::fs::remove_file(path).await;
    }
}

#[tokio::test]
async fn test_unsupported_input_extension() {
    let result = question_bulk_import::orchestrator::load_input(&temp_path("questions.xlsx")).await;
    assert_err!(result);
}

#[tokio::test]
async fn test_missing_input_file() {
    let err = question_bulk_import::orchestrator::load_input(&temp_path("missing.csv"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("文件不存在"));
}

/// 需要真实后端：API_BASE_URL / API_TOKEN / TARGET_ROLE / INPUT_FILE
#[tokio::test]
#[ignore]
async fn test_import_against_backend() {
    question_bulk_import::utils::logging::init(true);

    let config = Config::from_env().unwrap();
    let app = App::initialize(config).await.expect("创建客户端失败");
    let stats = app.run().await.expect("导入失败");
    println!("{:?}", stats);
}
