use std::fs;
use std::path::Path;

use crate::model::RouteDescriptor;

/// ルート定義ファイル (JSON) を読み込み、ルート定義列に変換する
///
/// ファイル形式はオブジェクトの配列:
/// `[{ "path": "/tasks/:id", "element": "TaskDetail", "label": "タスク詳細" }, ...]`
///
/// パターンの妥当性はここでは見ない (テーブル構築時にまとめて検証する)。
pub fn parse_route_file(file_path: &Path) -> Result<Vec<RouteDescriptor>, Box<dyn std::error::Error>> {
    println!("ファイル解析開始: {:?}", file_path);

    let src = fs::read_to_string(file_path)?;
    println!("ファイルサイズ: {} bytes", src.len());

    let routes = parse_route_source(&src).map_err(|e| {
        eprintln!("Parsing error in {:?}: {:?}", file_path, e);
        format!("Parse error: {:?}", e)
    })?;

    println!("解析完了: 発見されたルート数: {}", routes.len());

    Ok(routes)
}

/// JSON 文字列からルート定義列をデシリアライズする
pub fn parse_route_source(src: &str) -> Result<Vec<RouteDescriptor>, serde_json::Error> {
    serde_json::from_str(src)
}
