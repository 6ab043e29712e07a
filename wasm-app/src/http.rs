use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use gloo_net::http::Request;
use log::warn;
use pixelwar::api::{
    self, MessageBody, WaitTimeBody, CHOOSE_TEAM_PATH, GRID_PATH, PLACE_PIXEL_PATH, PLAYERS_PATH,
    WAIT_TIME_PATH,
};
use pixelwar::{
    ClientConfig, ClientError, ClientResult, Gateway, Grid, PixelChange, PlayerRecord, TeamChoice,
    Uid,
};
use serde::de::DeserializeOwned;

/// [`Gateway`] over the browser's `fetch`.
pub struct HttpGateway {
    config: ClientConfig,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        HttpGateway { config }
    }
}

async fn send<T: DeserializeOwned>(request: Request) -> ClientResult<T> {
    let response = request.send().await.map_err(ClientError::transport)?;
    let body = response.text().await.map_err(ClientError::transport)?;
    api::decode(response.status(), &body)
}

impl Gateway for HttpGateway {
    fn fetch_grid(&self) -> LocalBoxFuture<'_, ClientResult<Grid>> {
        let url = self.config.endpoint(GRID_PATH);
        async move {
            let request = Request::get(&url).build().map_err(ClientError::transport)?;
            send(request).await
        }
        .boxed_local()
    }

    fn fetch_wait_time(&self, uid: &Uid) -> LocalBoxFuture<'_, ClientResult<u64>> {
        let url = self.config.endpoint(WAIT_TIME_PATH);
        let uid = uid.clone();
        async move {
            let request = Request::get(&url)
                .query([("uid", uid.as_str())])
                .build()
                .map_err(ClientError::transport)?;
            let body: WaitTimeBody = send(request).await?;
            Ok(body.remaining_ms())
        }
        .boxed_local()
    }

    fn fetch_players(&self, uid: &Uid) -> LocalBoxFuture<'_, ClientResult<Vec<PlayerRecord>>> {
        let url = self.config.endpoint(PLAYERS_PATH);
        let uid = uid.clone();
        async move {
            let request = Request::get(&url)
                .query([("uid", uid.as_str())])
                .build()
                .map_err(ClientError::transport)?;
            send(request).await
        }
        .boxed_local()
    }

    fn submit_team_choice(&self, choice: &TeamChoice) -> LocalBoxFuture<'_, ClientResult<String>> {
        let url = self.config.endpoint(CHOOSE_TEAM_PATH);
        let choice = choice.clone();
        async move {
            let request = Request::put(&url)
                .json(&choice)
                .map_err(ClientError::transport)?;
            let body: MessageBody = send(request).await?;
            Ok(body.msg)
        }
        .boxed_local()
    }

    fn submit_pixel(&self, change: &PixelChange) -> LocalBoxFuture<'_, ClientResult<String>> {
        let url = self.config.endpoint(PLACE_PIXEL_PATH);
        let change = change.clone();
        async move {
            let request = Request::put(&url)
                .json(&change)
                .map_err(ClientError::transport)?;
            let body: MessageBody = send(request).await?;
            Ok(body.msg)
        }
        .boxed_local()
    }
}

/// Reads `config.json` next to the page, falling back to the defaults.
pub async fn load_config() -> ClientConfig {
    match Request::get("config.json").send().await {
        Ok(response) if response.ok() => match response.json::<ClientConfig>().await {
            Ok(config) => config,
            Err(err) => {
                warn!("config.json unreadable, using defaults: {err}");
                ClientConfig::default()
            }
        },
        Ok(response) => {
            warn!("config.json answered {}, using defaults", response.status());
            ClientConfig::default()
        }
        Err(err) => {
            warn!("config.json unavailable, using defaults: {err}");
            ClientConfig::default()
        }
    }
}
