use std::io::{self, BufWriter};

use clap::{Parser, Subcommand};

mod fake_stream;

use fake_stream::{FakeStreamArgs, Generator};

/// zlog 개발 태스크
#[derive(Parser)]
#[command(name = "xtask")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 가짜 로그 라인을 표준 출력으로 끝없이 생성
    ///
    /// 예: `cargo run -p xtask -- fake-stream | cargo run -p zlog-daemon`
    FakeStream(FakeStreamArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FakeStream(args) => {
            let mut generator = Generator::new(args);
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            match generator.run(&mut out) {
                // 파이프 반대편이 닫히면 정상 종료
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other.map_err(Into::into),
            }
        }
    }
}
