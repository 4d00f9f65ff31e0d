use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Variables de configuración que el crate lee con option_env!
    const KNOWN_KEYS: [&str; 4] = ["API_BASE_URL", "SESSION_STORAGE_KEY", "LOG_LEVEL", "ENVIRONMENT"];

    let env_file = Path::new(".env");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=build.rs");

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=No .env file found. Using built-in defaults (API at http://localhost:8080/api).");
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            println!("cargo:warning=Ignoring malformed .env line: {}", line);
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !KNOWN_KEYS.contains(&key) {
            println!("cargo:warning=Unknown .env key '{}' (ignored by the dashboard)", key);
            continue;
        }

        // El entorno del proceso tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
