use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use juridico::{CaseData, DocumentType, DraftingEngine, EngineConfig, ErrorKind};

/// Logger keeping every error-level line in memory
struct CaptureLogger
{   lines: Mutex<Vec<String>>
}

impl Log for CaptureLogger
{   fn enabled(&self, metadata: &Metadata) -> bool
    {   metadata.level() <= Level::Error
    }

    fn log(&self, record: &Record)
    {   if self.enabled(record.metadata())
        {   if let Ok(mut lines) = self.lines.lock()
            {   lines.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger
{   lines: Mutex::new(Vec::new())
};

#[tokio::test]
async fn test_upstream_error_body_is_bounded_in_logs()
{   log::set_logger(&LOGGER).expect("only logger in this binary");
    log::set_max_level(LevelFilter::Error);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/chat/completions"))
      .respond_with(
        ResponseTemplate::new(502).set_body_string("y".repeat(20_000))
      )
      .mount(&server)
      .await;

    let engine = DraftingEngine::new(
      EngineConfig::new("test-key").with_api_base(server.uri())
    );
    let case = CaseData::new()
      .with("consulente", "Prefeitura de Campinas")
      .with("consulta", "Licitação dispensada")
      .with("fatos", "Contratação emergencial");

    let result = engine.generate(DocumentType::ParecerJuridico, &case).await;
    assert_eq!(result.kind(), Some(ErrorKind::ApiError));

    let lines = LOGGER.lines.lock().expect("logger lock");
    assert!(lines.iter().any(|l| l.contains("HTTP 502")));
    for line in lines.iter()
    {   assert!(
          line.chars().count() < 1_000,
          "log line of {} chars",
          line.chars().count()
        );
    }
}
