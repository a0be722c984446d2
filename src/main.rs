// src/main.rs

use clap::Parser;
use std::path::PathBuf;
use walkdir::WalkDir;

mod model;
mod parser;
mod resolver;

use model::{RouteDescriptor, RouteTable};
use parser::parse_route_file;
use resolver::resolve;

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "Task Route Resolver",
    version = "0.1.0",
    author = "あなたの名前 <your.email@example.com>",
    about = "タスク管理フロントエンドのルートテーブルを構築し、パス解決とメニュー生成を JSON 出力する CLI ツール"
)]
struct Cli {
    /// ルート定義ファイルを探すプロジェクトルート (省略時は組み込みテーブルを使用)
    /// 例: `--project-root C:/path/to/my-frontend-project`
    #[arg(short = 'r', long = "project-root", value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// 解決したい具体パス (例: `--resolve /tasks/42`)
    /// 一致した定義と束縛パラメータを JSON 出力する (不一致なら null)
    #[arg(long = "resolve", value_name = "PATH")]
    resolve: Option<String>,

    /// ナビゲーションメニュー (label と path の一覧) を JSON 出力する
    #[arg(long = "menu")]
    menu: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) CLI 引数をパース
    let cli = Cli::parse();

    // 2) テーブルを構築: プロジェクトルート指定があればルート定義ファイルを探索、
    //    なければ組み込みのタスク管理テーブルを使用
    let table = match &cli.project_root {
        Some(root) => build_table_from_project(root)?,
        None => RouteTable::task_app_default(),
    };

    // 3) モードに応じて JSON を標準出力へ
    if let Some(target) = &cli.resolve {
        // 不一致は null として出力 (正常系であり、エラーにはしない)
        let result = resolve(&table, target);
        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);
    } else if cli.menu {
        let json = serde_json::to_string_pretty(&table.nav_links())?;
        println!("{}", json);
    } else {
        let json = serde_json::to_string_pretty(table.routes())?;
        println!("{}", json);
    }

    Ok(())
}

/// プロジェクトルート配下のルート定義ファイルを集めてテーブルを構築する関数
fn build_table_from_project(root: &PathBuf) -> Result<RouteTable, Box<dyn std::error::Error>> {
    let project_dir = root.canonicalize()?; // 絶対化

    // 1) WalkDir で全ファイルを再帰的に探索し、
    //    ファイル名が「routes.json」で終わる .json ファイルをルート定義候補として集める
    let mut route_file_paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(&project_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().map_or(false, |ext| ext == "json")
        })
    {
        let path = entry.path();
        if let Some(fname) = path.file_name().and_then(|n| n.to_str()) {
            // `routes.json` / `app.routes.json` などをルート定義とみなす
            if fname.ends_with("routes.json") {
                route_file_paths.push(path.to_path_buf());
            }
        }
    }

    // ルート定義ファイルが見つからなければエラー
    if route_file_paths.is_empty() {
        eprintln!("Error: ルート定義ファイルが見つかりませんでした。");
        std::process::exit(1);
    }

    // 重複を除去
    route_file_paths.sort();
    route_file_paths.dedup();

    // 2) 見つけたファイルを順に解析し、ファイル順にマージ
    let mut all_routes: Vec<RouteDescriptor> = Vec::new();
    for route_path in route_file_paths {
        println!("解析中: {:?}", route_path);
        all_routes.extend(parse_route_file(&route_path)?);
    }

    // 3) パターン検証込みでテーブル化 (不正パターンはここで即エラー)
    let table = RouteTable::new(all_routes)?;
    Ok(table)
}
