//! # 无头宿主
//!
//! 用脚本化的滚动会话驱动 fx-runtime，把效果指令打到终端。
//! 页面描述是一个 JSON 数组，每项对应一个候选节点：
//!
//! ```json
//! [
//!   {
//!     "node_key": 1,
//!     "effect": "parallax",
//!     "options": "direction:Y;level:2;speed:1",
//!     "geometry": { "offset_top": 1500.0, "height": 300.0,
//!                   "offset_left": 0.0, "width": 800.0 }
//!   }
//! ]
//! ```
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-headless -- page.json
//! cargo run -p host-headless -- page.json --scroll-to 3000 --duration-ms 5000
//! cargo run -p host-headless -- page.json --view-height 1080 --verbose
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fx_runtime::NodeDescriptor;

mod sim;

use sim::Simulator;

#[derive(Parser)]
#[command(name = "fx-headless")]
#[command(about = "无头宿主 - 用脚本化的滚动会话驱动 fx-runtime")]
#[command(version)]
struct Cli {
    /// 页面描述 JSON 文件
    page: PathBuf,

    /// 视口高度（像素）
    #[arg(long, default_value_t = 800.0)]
    view_height: f32,

    /// 滚动目标偏移（像素）
    #[arg(long, default_value_t = 3000.0)]
    scroll_to: f32,

    /// 滚动总时长（毫秒）
    #[arg(long, default_value_t = 4000)]
    duration_ms: u64,

    /// 模拟步长（毫秒）
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// 滚动结束后的原地等待时长（毫秒），给轮询链和动画收尾
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,

    /// 打印每条效果指令
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let raw = fs::read_to_string(&cli.page)
        .with_context(|| format!("读取页面描述失败: {}", cli.page.display()))?;
    let page: Vec<NodeDescriptor> =
        serde_json::from_str(&raw).context("页面描述不是合法的节点数组")?;

    let mut sim = Simulator::new(page, cli.view_height)?;
    sim.scroll_to(cli.scroll_to, cli.duration_ms, cli.step_ms)?;
    sim.idle(cli.settle_ms, cli.step_ms)?;
    sim.teardown()?;

    info!("会话结束，共 {} 条效果指令", sim.log().len());
    for line in sim.log() {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_page_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"node_key": 1, "effect": "parallax",
                 "geometry": {{"offset_top": 1500.0, "height": 300.0,
                               "offset_left": 0.0, "width": 800.0}}}}]"#
        )
        .unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        let page: Vec<NodeDescriptor> = serde_json::from_str(&raw).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].effect.as_deref(), Some("parallax"));

        let mut sim = Simulator::new(page, 800.0).unwrap();
        sim.scroll_to(2000.0, 500, 16).unwrap();
        assert!(sim.log().iter().any(|l| l.starts_with("SetTransform")));
    }
}
