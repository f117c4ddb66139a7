//! 命令行参数定义

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unireg", about = "UniReg student registration client")]
pub struct Cli {
    /// 后端 API 地址（覆盖 UNIREG_API_URL）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// 会话文件路径（覆盖 UNIREG_SESSION_FILE）
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the subjects offered in a semester
    Subjects {
        #[arg(allow_negative_numbers = true)]
        semester: i64,
    },
    /// Sign in as a student (or an admin with --admin)
    Login {
        #[arg(long)]
        student_id: String,
        #[arg(long, env = "UNIREG_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    /// Create a student account
    Register {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out and forget the stored token
    Logout {
        #[arg(long)]
        admin: bool,
    },
    /// Submit the semester registration form from a TOML draft
    Submit {
        #[arg(long)]
        form: PathBuf,
        #[arg(long)]
        receipt: PathBuf,
        /// Confirm that the submitted data is correct
        #[arg(long)]
        verified: bool,
    },
    /// List all submissions (admin)
    Submissions {
        #[arg(long)]
        search: Option<String>,
        /// Write the listed rows to a CSV file
        #[arg(long)]
        export: bool,
        /// Export directory (overrides UNIREG_EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    /// 环境变量配置叠加命令行参数
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(path) = &self.session_file {
            config.session_file = path.clone();
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submissions_command() {
        let cli = Cli::try_parse_from([
            "unireg",
            "--api-url",
            "http://example.test/api",
            "submissions",
            "--search",
            "cs101",
            "--export",
        ])
        .unwrap();
        assert_eq!(cli.config().api_base_url, "http://example.test/api");
        match cli.command {
            Command::Submissions { search, export, out } => {
                assert_eq!(search.as_deref(), Some("cs101"));
                assert!(export);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_semester() {
        let cli = Cli::try_parse_from(["unireg", "subjects", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Subjects { semester: -3 }));
    }

    #[test]
    fn test_parse_admin_login() {
        let cli = Cli::try_parse_from([
            "unireg",
            "login",
            "--student-id",
            "A1",
            "--password",
            "secret",
            "--admin",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Login { admin: true, .. }));
    }
}
