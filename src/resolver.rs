use std::collections::HashMap;

use crate::model::{PathPattern, RouteMatch, RouteTable, Segment};

/// 具体パスを比較前の正規形に揃える関数
///
/// - 末尾のスラッシュを取り除く (ルート "/" のみ例外として残す)
/// - 空文字列はルート "/" とみなす
///
/// "/tasks/" と "/tasks" は意味的に区別しない。
pub fn normalize_path(path: &str) -> &str {
    let mut p = path;
    while p.len() > 1 && p.ends_with('/') {
        p = &p[..p.len() - 1];
    }
    if p.is_empty() { "/" } else { p }
}

/// 正規形パスをセグメント列に分割する (ルート "/" は0個)
fn split_segments(path: &str) -> Vec<&str> {
    if path == "/" {
        return Vec::new();
    }
    let body = path.strip_prefix('/').unwrap_or(path);
    body.split('/').collect()
}

/// 現在の URL パスをテーブルに対して解決する関数
///
/// - `table`: 宣言順を保持するルートテーブル
/// - `current_path`: ナビゲーションイベントで得た具体パス (例: "/tasks/42")
///
/// マッチングは宣言順の走査で、最初に一致した定義が勝つ (以降は走査しない)。
/// セグメント数が一致しないパターンは不一致 (ワイルドカード接尾辞なし)。
///
/// 戻り値:
/// - Some(RouteMatch) → 一致した定義と、`:name` セグメントの束縛値
/// - None             → 不一致 (フォールバックの決定は呼び出し側の責務)
pub fn resolve<'a>(table: &'a RouteTable, current_path: &str) -> Option<RouteMatch<'a>> {
    // 1) 正規化してからセグメント分割
    let normalized = normalize_path(current_path);
    let segments = split_segments(normalized);

    // 2) 宣言順に走査し、先勝ちで返却
    for (route, pattern) in table.entries() {
        if let Some(params) = match_pattern(pattern, &segments) {
            return Some(RouteMatch { route, params });
        }
    }

    // 3) どの定義にも一致しなければ None (エラーではない)
    None
}

/// 1パターンと具体セグメント列の照合
///
/// セグメント数が厳密に一致し、固定セグメントは完全一致、
/// パラメータセグメントは空でない任意の1セグメントに一致して値を束縛する。
fn match_pattern(pattern: &PathPattern, segments: &[&str]) -> Option<HashMap<String, String>> {
    if pattern.segments.len() != segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern.segments.iter().zip(segments) {
        match expected {
            Segment::Literal(lit) => {
                if lit != actual {
                    return None;
                }
            }
            Segment::Param(name) => {
                // 空セグメントはパラメータに束縛しない
                if actual.is_empty() {
                    return None;
                }
                params.insert(name.clone(), (*actual).to_string());
            }
        }
    }

    Some(params)
}
