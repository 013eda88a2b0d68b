//! Process categorization based on the short command name.

use serde::{Deserialize, Serialize};

/// Category of process based on its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProcessType {
    /// Web servers (nginx, apache, caddy, etc.)
    WebServer,
    /// Database servers (postgres, mysql, redis, etc.)
    Database,
    /// Development tools (node, python, vite, etc.)
    Development,
    /// System daemons (launchd, systemd, mDNSResponder, etc.)
    System,
    /// Other/unknown processes
    #[default]
    Other,
}

impl ProcessType {
    /// Detect the process type from a short command name.
    ///
    /// Matching is case-insensitive and substring based, checked in the
    /// order web server, database, development, system.
    pub fn detect(command: &str) -> Self {
        let name = command.to_lowercase();

        const WEB_SERVERS: &[&str] = &[
            "nginx", "apache", "httpd", "caddy", "traefik", "lighttpd", "envoy", "haproxy",
        ];
        if WEB_SERVERS.iter().any(|s| name.contains(s)) {
            return ProcessType::WebServer;
        }

        const DATABASES: &[&str] = &[
            "postgres", "mysql", "mariadb", "redis", "mongo", "cockroach", "clickhouse",
            "cassandra", "elasticsearch", "memcached",
        ];
        if DATABASES.iter().any(|s| name.contains(s)) {
            return ProcessType::Database;
        }

        const DEV_TOOLS: &[&str] = &[
            "node", "npm", "yarn", "pnpm", "bun", "deno", "python", "ruby", "php", "java",
            "cargo", "rustc", "vite", "webpack", "esbuild", "flask", "gunicorn", "uvicorn",
        ];
        if DEV_TOOLS.iter().any(|s| name.contains(s)) {
            return ProcessType::Development;
        }

        const SYSTEM_PROCS: &[&str] = &[
            "launchd", "rapportd", "sharingd", "mdnsresponder", "controlce", "systemd",
            "dbus", "cupsd", "sshd", "avahi", "chronyd",
        ];
        if SYSTEM_PROCS.iter().any(|s| name.contains(s)) {
            return ProcessType::System;
        }

        ProcessType::Other
    }

    /// Short label used in table output.
    pub fn short_label(&self) -> &'static str {
        match self {
            ProcessType::WebServer => "Web",
            ProcessType::Database => "DB",
            ProcessType::Development => "Dev",
            ProcessType::System => "Sys",
            ProcessType::Other => "-",
        }
    }
}
