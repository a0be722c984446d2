// src/model.rs
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// ルートテーブルの1エントリを表す構造体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// URL パスパターン (例: "/", "/tasks/:id")
    /// `:name` で始まるセグメントは名前付きパラメータ
    pub path: String,

    /// 描画単位への不透明なハンドル (例: "Dashboard")
    /// テーブル側は中身を一切解釈しない
    pub element: String,

    /// ナビゲーションメニュー表示用のラベル
    pub label: String,
}

/// コンパイル済みパターンを構成する1セグメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// 固定文字列セグメント (例: "tasks")
    Literal(String),

    /// `:id` のような名前付きパラメータセグメント (`:` を除いた名前を保持)
    Param(String),
}

/// テーブル構築時にコンパイルされるパスパターン
/// ルート "/" はセグメント0個としてコンパイルされる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pub segments: Vec<Segment>,
}

/// テーブル構築時に検出される設定エラー
/// 不正なパターンはルックアップ時の未定義動作を避けるため、構築を拒否する
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("パスパターンが空です")]
    EmptyPath,

    #[error("パスパターンは '/' で始まる必要があります: {0:?}")]
    NotAbsolute(String),

    #[error("パスパターンに空のセグメントが含まれています: {0:?}")]
    EmptySegment(String),

    #[error("パラメータ名が空のセグメントがあります: {0:?}")]
    EmptyParamName(String),
}

impl PathPattern {
    /// パターン文字列をセグメント列にコンパイルする
    ///
    /// - `pattern`: "/" 始まりの正規形パターン (末尾スラッシュは不正とみなす)
    ///
    /// 戻り値:
    /// - Ok(PathPattern) → コンパイル成功
    /// - Err(TableError) → 不正なパターン (構築時に即座に失敗させる)
    pub fn compile(pattern: &str) -> Result<Self, TableError> {
        if pattern.is_empty() {
            return Err(TableError::EmptyPath);
        }
        if !pattern.starts_with('/') {
            return Err(TableError::NotAbsolute(pattern.to_string()));
        }

        // ルート "/" はセグメントなし
        if pattern == "/" {
            return Ok(PathPattern { segments: Vec::new() });
        }

        let mut segments = Vec::new();
        for raw in pattern[1..].split('/') {
            if raw.is_empty() {
                // "//" や末尾スラッシュはここに落ちる
                return Err(TableError::EmptySegment(pattern.to_string()));
            }
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(TableError::EmptyParamName(pattern.to_string()));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        Ok(PathPattern { segments })
    }
}

/// 宣言順を保持する読み取り専用のルートテーブル
/// 構築後は不変で、リゾルバとメニュー描画側は参照のみを持つ
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    patterns: Vec<PathPattern>,
}

/// ナビゲーションメニュー1リンク分 (ラベルとパスの組)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

/// 解決結果: マッチしたルートと、パラメータセグメントの束縛値
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    pub params: HashMap<String, String>,
}

impl RouteTable {
    /// ルート定義列からテーブルを構築する
    ///
    /// 全パターンをこの時点でコンパイルし、不正なものがあれば Err を返す。
    /// パスの重複は設定不備として警告のみ (解決時は先勝ちで後続が隠れる)。
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, TableError> {
        let mut patterns = Vec::with_capacity(routes.len());
        let mut seen: HashSet<&str> = HashSet::new();

        for route in &routes {
            patterns.push(PathPattern::compile(&route.path)?);
            if !seen.insert(route.path.as_str()) {
                println!(
                    "警告: 重複したパスパターンを検出: {:?} (先勝ちで解決され、後続の定義は隠れます)",
                    route.path
                );
            }
        }

        Ok(RouteTable { routes, patterns })
    }

    /// 宣言順のルート定義列を返す (毎回同じ内容・同じ順序)
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// (定義, コンパイル済みパターン) を宣言順にたどるイテレータ
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&RouteDescriptor, &PathPattern)> {
        self.routes.iter().zip(self.patterns.iter())
    }

    /// ナビゲーションメニュー用に、1定義につき1リンクを宣言順で生成する
    pub fn nav_links(&self) -> Vec<NavLink> {
        self.routes
            .iter()
            .map(|r| NavLink {
                label: r.label.clone(),
                path: r.path.clone(),
            })
            .collect()
    }

    /// タスク管理アプリ組み込みのルートテーブル
    /// アプリシェル初期化時にこれを構築し、参照を配下に渡す想定
    pub fn task_app_default() -> Self {
        let routes = vec![
            RouteDescriptor {
                path: "/".to_string(),
                element: "Dashboard".to_string(), // トップページ（ダッシュボード）
                label: "ダッシュボード".to_string(),
            },
            RouteDescriptor {
                path: "/tasks".to_string(),
                element: "TaskList".to_string(), // タスク一覧
                label: "タスク一覧".to_string(),
            },
            RouteDescriptor {
                path: "/tasks/new".to_string(),
                element: "TaskEdit".to_string(), // タスク新規作成
                label: "タスク作成".to_string(),
            },
            RouteDescriptor {
                path: "/tasks/:id".to_string(),
                element: "TaskDetail".to_string(), // タスク詳細
                label: "タスク詳細".to_string(),
            },
            RouteDescriptor {
                path: "/tasks/:id/edit".to_string(),
                element: "TaskEdit".to_string(), // タスク編集
                label: "タスク編集".to_string(),
            },
            RouteDescriptor {
                path: "/categories".to_string(),
                element: "Category".to_string(), // カテゴリ管理
                label: "カテゴリ管理".to_string(),
            },
            RouteDescriptor {
                path: "/tags".to_string(),
                element: "Tag".to_string(), // タグ管理
                label: "タグ管理".to_string(),
            },
        ];

        Self::new(routes).expect("組み込みルートテーブルのパターンは常に妥当")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(path: &str) -> RouteDescriptor {
        RouteDescriptor {
            path: path.to_string(),
            element: "Stub".to_string(),
            label: "stub".to_string(),
        }
    }

    #[test]
    fn compile_root_has_no_segments() {
        let p = PathPattern::compile("/").unwrap();
        assert!(p.segments.is_empty());
    }

    #[test]
    fn compile_splits_literals_and_params() {
        let p = PathPattern::compile("/tasks/:id/edit").unwrap();
        assert_eq!(
            p.segments,
            vec![
                Segment::Literal("tasks".to_string()),
                Segment::Param("id".to_string()),
                Segment::Literal("edit".to_string()),
            ]
        );
    }

    #[test]
    fn compile_rejects_empty_pattern() {
        assert_eq!(PathPattern::compile(""), Err(TableError::EmptyPath));
    }

    #[test]
    fn compile_rejects_relative_pattern() {
        assert_eq!(
            PathPattern::compile("tasks"),
            Err(TableError::NotAbsolute("tasks".to_string()))
        );
    }

    #[test]
    fn compile_rejects_empty_segment() {
        assert_eq!(
            PathPattern::compile("/tasks//edit"),
            Err(TableError::EmptySegment("/tasks//edit".to_string()))
        );
        // 末尾スラッシュ付きパターンも正規形でないため拒否
        assert_eq!(
            PathPattern::compile("/tasks/"),
            Err(TableError::EmptySegment("/tasks/".to_string()))
        );
    }

    #[test]
    fn compile_rejects_empty_param_name() {
        assert_eq!(
            PathPattern::compile("/tasks/:"),
            Err(TableError::EmptyParamName("/tasks/:".to_string()))
        );
    }

    #[test]
    fn new_fails_fast_on_malformed_pattern() {
        let err = RouteTable::new(vec![desc("/"), desc("tasks")]).unwrap_err();
        assert_eq!(err, TableError::NotAbsolute("tasks".to_string()));
    }

    #[test]
    fn new_accepts_duplicate_paths_as_config_defect() {
        // 重複は警告のみで構築自体は成功する
        let table = RouteTable::new(vec![desc("/tasks"), desc("/tasks")]).unwrap();
        assert_eq!(table.routes().len(), 2);
    }

    #[test]
    fn routes_are_stable_and_idempotent() {
        let table = RouteTable::task_app_default();
        let first: Vec<RouteDescriptor> = table.routes().to_vec();
        let second: Vec<RouteDescriptor> = table.routes().to_vec();
        assert_eq!(first, second);

        let paths: Vec<&str> = table.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/tasks",
                "/tasks/new",
                "/tasks/:id",
                "/tasks/:id/edit",
                "/categories",
                "/tags",
            ]
        );
    }

    #[test]
    fn nav_links_follow_declaration_order() {
        let table = RouteTable::task_app_default();
        let links = table.nav_links();
        assert_eq!(links.len(), table.routes().len());
        assert_eq!(
            links[0],
            NavLink {
                label: "ダッシュボード".to_string(),
                path: "/".to_string(),
            }
        );
        assert_eq!(links[3].path, "/tasks/:id");
        assert_eq!(links[3].label, "タスク詳細");
    }
}
