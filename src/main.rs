#![forbid(unsafe_code)]

use log::info;
use poem::listener::{Listener, RustlsCertificate, RustlsConfig, TcpListener};

use crate::api::make_routes;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod api;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HelloServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    println!("Starting hello_server!");
    let ctx = match hello_init() {
        Ok(c) => c,
        Err(e) => return Err(std::io::Error::other(e.to_string())),
    };

    // --------------- Main Loop Set Up ---------------
    let config = &ctx.parms.config;
    let addr = config.bind_addr();
    let app = make_routes(config.server_url.as_deref());

    // ------------------ Main Loop -------------------
    if config.tls {
        let (cert, key) = match ctx.tls_pems() {
            Ok(pems) => pems,
            Err(e) => return Err(std::io::Error::other(e.to_string())),
        };
        info!("{} listening on https://{}", config.title, addr);
        poem::Server::new(
            TcpListener::bind(addr).rustls(
                RustlsConfig::new().fallback(
                    RustlsCertificate::new()
                        .key(key)
                        .cert(cert),
                ),
            ),
        )
        .name(SERVER_NAME)
        .run(app)
        .await
    } else {
        info!("{} listening on http://{}", config.title, addr);
        poem::Server::new(TcpListener::bind(addr))
            .name(SERVER_NAME)
            .run(app)
            .await
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello_init:
// ---------------------------------------------------------------------------
/** Configure logging, then read the command line and configuration file. */
fn hello_init() -> anyhow::Result<RuntimeCtx> {
    init_log()?;

    let ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", ctx)));

    print_version_info();
    Ok(ctx)
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("\n*** Running HELLO_SERVER={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}.",
          env!("CARGO_PKG_VERSION"),
          env!("GIT_BRANCH"),
          env!("GIT_COMMIT_SHORT"),
          env!("GIT_DIRTY"),
          env!("SOURCE_TIMESTAMP"),
          env!("RUSTC_VERSION"),
    );
}
