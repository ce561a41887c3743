use gitpilot::audit::AuditLogger;
use gitpilot::config::Config;
use gitpilot::error::AppResult;
use gitpilot::llm::ResolveError;
use gitpilot::{GeminiClient, GitError, GitVersion, PushOrchestrator, Repository, Resolver};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let version = GitVersion::validate()?;
    eprintln!("Git version: {}", version);

    let repo = match Repository::discover() {
        Ok(repo) => repo,
        Err(GitError::NotARepository) => {
            let cwd = std::env::current_dir()?;
            eprintln!("No repository found, initializing one in {}", cwd.display());
            Repository::init_at(cwd)?
        }
        Err(e) => return Err(e.into()),
    };

    let config = Config::load().unwrap_or_else(|_| Config::default_config());
    let api_key = config.get_api_key().unwrap_or_else(|| {
        eprintln!(
            "Warning: no API key found (set {}); requests will fail",
            config.llm.api_key_env
        );
        String::new()
    });

    let client = GeminiClient::with_model(api_key, config.llm.model.clone())?;
    let resolver = Resolver::new(Box::new(client));
    let logger = if config.behavior.log_commands {
        AuditLogger::new().ok()
    } else {
        None
    };

    println!("gitpilot - describe what you want to do, or :info / :pull / :push <url> / :quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":info" => println!("{}", repo.info()?.render()),
            ":pull" => match repo.pull_current() {
                Ok(output) => print!("{}", output.text()),
                Err(e) => println!("{}", e),
            },
            _ if line.starts_with(":push") => {
                let url = line.trim_start_matches(":push").trim();
                if url.is_empty() {
                    println!("usage: :push <remote-url>");
                    continue;
                }
                let report = PushOrchestrator::new(repo.executor()).push(url);
                for entry in &report.transcript {
                    println!("  {}", entry);
                }
                println!("{}", if report.success { "push succeeded" } else { "push failed" });
            }
            request => handle_request(&resolver, &repo, logger.as_ref(), request).await,
        }
    }

    Ok(())
}

/// Resolve one request and run it; failures become text, never a crash
async fn handle_request(
    resolver: &Resolver,
    repo: &Repository,
    logger: Option<&AuditLogger>,
    request: &str,
) {
    let info = match repo.info() {
        Ok(info) => info,
        Err(e) => {
            println!("could not read repository state: {}", e);
            return;
        }
    };

    let command = match resolver.resolve(request, &info).await {
        Ok(command) => command,
        Err(e) => {
            if let (Some(logger), ResolveError::Catalog(_) | ResolveError::MalformedResponse(_)) =
                (logger, &e)
            {
                let _ = logger.log_rejection(request, &e.to_string(), repo.path());
            }
            println!("{}", e);
            return;
        }
    };

    println!("-> {}", command);

    match repo.executor().run(command.args()) {
        Ok(output) => {
            if let Some(logger) = logger {
                let _ = logger.log_command(&command.to_string(), repo.path(), output.exit_code);
            }
            print!("{}", output.text());
        }
        Err(e) => println!("{}", e),
    }
}
