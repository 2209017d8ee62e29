#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use std::{env, fs, path::Path};
use lazy_static::lazy_static;
use structopt::StructOpt;

use crate::utils::{hello_utils, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_HELLO_ROOT_DIR   : &str = "HELLO_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.hello_server";
const CONFIG_DIR           : &str = "/config";
const CERTS_DIR            : &str = "/certs";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";        // relative to config dir
const HELLO_CONFIG_FILE    : &str = "/hello_server.toml"; // relative to config dir
const CERT_FILE            : &str = "/cert.pem";          // relative to certs dir
const KEY_FILE             : &str = "/key.pem";           // relative to certs dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "0.0.0.0";
const DEFAULT_HTTP_PORT    : u16  = 8000;

// Console logging used when no log4rs file is installed.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE the runtime context is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: HelloArgs = init_hello_args();
}

// Calculate the data directories BEFORE the runtime context is initialized in main.
lazy_static! {
    pub static ref HELLO_DIRS: HelloDirs = init_hello_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloDirs:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct HelloDirs {
    pub root_dir: String,
    pub config_dir: String,
    pub certs_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, Default, StructOpt)]
#[structopt(name = "hello_server", about = "Command line arguments for hello_server.")]
pub struct HelloArgs {
    /// Specify the server's root data directory.
    ///
    /// The root directory is calculated using the following priority order:
    ///
    ///   1. If set, the value of the HELLO_ROOT_DIR environment variable,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.hello_server
    ///
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Address to bind, overrides the configuration file.
    #[structopt(long)]
    pub http_addr: Option<String>,

    /// Port to bind, overrides the configuration file.
    #[structopt(short = "p", long)]
    pub http_port: Option<u16>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub hello_args: &'static HelloArgs,
    pub hello_dirs: &'static HelloDirs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    /// Public URL advertised in the generated OpenAPI document.
    pub server_url: Option<String>,
    /// Serve https using the certificates in the certs directory.
    pub tls: bool,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// The socket address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_addr, self.http_port)
    }

    /// Command line values take precedence over the configuration file.
    pub fn apply_args(&mut self, args: &HelloArgs) {
        if let Some(addr) = &args.http_addr {
            self.http_addr = addr.clone();
        }
        if let Some(port) = args.http_port {
            self.http_port = port;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "hello_server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            server_url: None,
            tls: false,
        }
    }
}

impl RuntimeCtx {
    /// The certificate and key pem contents from the certs directory.
    pub fn tls_pems(&self) -> Result<(Vec<u8>, Vec<u8>), Errors> {
        read_tls_pems(&self.hello_dirs.certs_dir)
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hello_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_hello_args() -> HelloArgs {
    HelloArgs::from_args()
}

// ---------------------------------------------------------------------------
// init_hello_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories.  None of them need to exist. */
fn init_hello_dirs() -> HelloDirs {
    let root_dir = get_root_dir(env::var(ENV_HELLO_ROOT_DIR).ok(), HELLO_ARGS.root_dir.clone());
    make_hello_dirs(root_dir)
}

fn make_hello_dirs(root_dir: String) -> HelloDirs {
    let config_dir = root_dir.clone() + CONFIG_DIR;
    let certs_dir = root_dir.clone() + CERTS_DIR;
    HelloDirs { root_dir, config_dir, certs_dir }
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir(env_dir: Option<String>, arg_dir: Option<String>) -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env_dir
        .or(arg_dir)
        .unwrap_or_else(|| DEFAULT_ROOT_DIR.to_string());

    hello_utils::get_absolute_path(&root_dir)
}

// ---------------------------------------------------------------------------
// read_tls_pems:
// ---------------------------------------------------------------------------
fn read_tls_pems(certs_dir: &str) -> Result<(Vec<u8>, Vec<u8>), Errors> {
    let cert = fs::read(certs_dir.to_string() + CERT_FILE)?;
    let key = fs::read(certs_dir.to_string() + KEY_FILE)?;
    Ok((cert, key))
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Use the installed log4rs configuration file if there is one, otherwise
 * log to the console at info level.
 */
pub fn init_log() -> Result<()> {
    let logconfig = init_log_config();
    if Path::new(&logconfig).is_file() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            return Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e));
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        log4rs::init_config(default_log_config()?)?;
        info!("Log4rs initialized with console defaults, no file at: {}", logconfig);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    HELLO_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

// ---------------------------------------------------------------------------
// default_log_config:
// ---------------------------------------------------------------------------
fn default_log_config() -> Result<log4rs::Config> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    Ok(config)
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config directory.  A missing file means default values are used; a file
 * that cannot be parsed is an error.  Command line overrides are applied last.
 */
fn get_parms(config_dir: &str, args: &HelloArgs) -> Result<Parms> {
    let config_file = hello_utils::get_absolute_path(&(config_dir.to_string() + HELLO_CONFIG_FILE));

    info!("{}", Errors::ReadingConfigFile(config_file.clone()));
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            let mut config = Config::new();
            config.apply_args(args);
            return Ok(Parms { config_file: Default::default(), config });
        }
    };

    let mut config = parse_config(&config_file, &contents)?;
    config.apply_args(args);

    Ok(Parms { config_file, config })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
fn parse_config(config_file: &str, contents: &str) -> Result<Config> {
    match toml::from_str(contents) {
        Ok(c)  => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.to_string()), e);
            error!("{}", msg);
            Err(anyhow!(msg))
        }
    }
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let parms = get_parms(&HELLO_DIRS.config_dir, &HELLO_ARGS)?;
    Ok(RuntimeCtx {parms, hello_args: &HELLO_ARGS, hello_dirs: &HELLO_DIRS})
}
