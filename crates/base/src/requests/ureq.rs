use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::{bail, Result};
use ureq::Error;

#[derive(Default)]
pub struct UreqRequestApi {}

impl UreqRequestApi {
    pub fn new() -> Self {
        Default::default()
    }
}

impl SyncHttpRequest for UreqRequestApi {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        let req_fn = match req.method {
            HttpRequestMethod::Get => ureq::get,
            HttpRequestMethod::Post => ureq::post,
        };

        let mut request = req_fn(&req.url);

        if let Some(queries) = &req.queries {
            for (param, value) in queries {
                request = request.query(param, value);
            }
        }

        if let Some(timeout) = req.timeout {
            request = request.timeout(timeout);
        }

        let res = if let Some(body) = req.body {
            request.send_json(body)
        } else {
            request.call()
        };

        match res {
            Ok(resp) => Ok(resp.into_string()?),
            // the url contains the bot token and must not reach the logs
            Err(Error::Status(code, resp)) => {
                bail!(
                    "request failed with a code {}: {}",
                    code,
                    resp.into_string()?
                );
            }
            Err(e) => bail!("request failed: {}", e.kind()),
        }
    }
}
