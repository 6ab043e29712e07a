use std::path::{Path, PathBuf};
use std::{env, fmt::Display, io, str::FromStr};

use actix_web::http::header::ContentType;
use actix_web::web::{self, Data};
use actix_web::{get, middleware::Logger, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};

use pixelwar::ClientConfig;

struct ServerConfig {
    bind: String,
    web_root: PathBuf,
    pkg_dir: PathBuf,
    client: ClientConfig,
}

impl ServerConfig {
    fn load() -> io::Result<Self> {
        let defaults = ClientConfig::default();
        Ok(ServerConfig {
            bind: try_load("PIXELD_BIND", "127.0.0.1:8080")?,
            web_root: try_load::<String>("PIXELD_WEB_ROOT", "./web")?.into(),
            pkg_dir: try_load::<String>("PIXELD_PKG_DIR", "./wasm-app/pkg")?.into(),
            client: ClientConfig {
                api_base_url: try_load("PIXEL_API_URL", &defaults.api_base_url)?,
                poll_interval_ms: try_load("PIXEL_POLL_MS", &defaults.poll_interval_ms.to_string())?,
                ..defaults
            },
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> io::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid {key}: {e}"))
    })
}

fn content_type(file: &str) -> &'static str {
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("css") => "text/css",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Reads `file` from `dir`, refusing anything that could leave it.
fn serve_file(dir: &Path, file: &str) -> HttpResponse {
    if file.is_empty() || file.starts_with('.') || file.contains(|c: char| c == '/' || c == '\\') {
        return HttpResponse::NotFound().body("no such file");
    }
    match std::fs::read(dir.join(file)) {
        Ok(bytes) => HttpResponse::Ok().content_type(content_type(file)).body(bytes),
        Err(err) => {
            warn!("cannot read {}: {err}", dir.join(file).display());
            HttpResponse::NotFound().body("no such file")
        }
    }
}

#[get("/")]
async fn index(config: Data<ServerConfig>) -> impl Responder {
    match std::fs::read(config.web_root.join("index.html")) {
        Ok(index_html) => HttpResponse::Ok()
            .append_header(ContentType::html())
            .body(index_html),
        Err(err) => {
            warn!("index.html missing under {}: {err}", config.web_root.display());
            HttpResponse::NotFound().body("index.html missing")
        }
    }
}

#[get("/config.json")]
async fn client_config(config: Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(&config.client)
}

#[get("/pkg/{file}")]
async fn pkg(config: Data<ServerConfig>, path: web::Path<String>) -> impl Responder {
    serve_file(&config.pkg_dir, &path.into_inner())
}

#[get("/img/{file}")]
async fn img(config: Data<ServerConfig>, path: web::Path<String>) -> impl Responder {
    serve_file(&config.web_root.join("img"), &path.into_inner())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::load()?;
    let bind = config.bind.clone();
    info!(
        "serving {} for API {}",
        config.web_root.display(),
        config.client.api_base_url
    );
    let data = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::new("%r %s %Dms"))
            .service(index)
            .service(client_config)
            .service(pkg)
            .service(img)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::test::{call_and_read_body_json, call_service, init_service, TestRequest};

    use super::*;

    fn test_config(root: PathBuf) -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:0".into(),
            web_root: root.clone(),
            pkg_dir: root,
            client: ClientConfig {
                api_base_url: "http://api.test".into(),
                ..ClientConfig::default()
            },
        }
    }

    #[test]
    fn content_types_cover_wasm_pack_output() {
        assert_eq!(content_type("pixelwar_wasm_bg.wasm"), "application/wasm");
        assert_eq!(content_type("pixelwar_wasm.js"), "application/javascript");
        assert_eq!(content_type("hide.png"), "image/png");
        assert_eq!(content_type("README"), "application/octet-stream");
    }

    #[test]
    fn hidden_and_nested_paths_are_refused() {
        let dir = env::temp_dir();
        for name in ["", "..", ".env", "a/b", "..\\secret"] {
            assert_eq!(serve_file(&dir, name).status(), 404, "{name:?}");
        }
    }

    #[actix_web::test]
    async fn config_endpoint_serves_client_settings() {
        let app = init_service(
            App::new()
                .app_data(Data::new(test_config(env::temp_dir())))
                .service(client_config),
        )
        .await;
        let req = TestRequest::get().uri("/config.json").to_request();
        let body: ClientConfig = call_and_read_body_json(&app, req).await;
        assert_eq!(body.api_base_url, "http://api.test");
        assert_eq!(body.poll_interval_ms, 1000);
    }

    #[actix_web::test]
    async fn pkg_files_are_served_with_their_type() {
        let dir = env::temp_dir().join(format!("pixeld-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("app.js"), "export {}").unwrap();

        let app = init_service(
            App::new()
                .app_data(Data::new(test_config(dir.clone())))
                .service(pkg),
        )
        .await;
        let req = TestRequest::get().uri("/pkg/app.js").to_request();
        let resp = call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/javascript"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
