//! # アプリケーション構築
//!
//! DI（リポジトリ・ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;
use todoapp_infra::{
    PasswordService,
    db::SqliteTransactionManager,
    repository::SqliteUserRepository,
};
use todoapp_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{ReadinessState, UserState, health_check, readiness_check, sign_up},
    usecase::UserUseCaseImpl,
};

/// SQLite プールとパスワードサービスから State を組み立て、ルーターを構築する
pub fn build_app(pool: SqlitePool, password_service: Arc<dyn PasswordService>) -> Router {
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let usecase = UserUseCaseImpl::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteTransactionManager::new(pool)),
        password_service,
    );
    let user_state = Arc::new(UserState {
        usecase: Arc::new(usecase),
    });

    build_router(user_state, readiness_state)
}

/// State を受け取ってルーターを構築する
///
/// レイヤーは下から順に外側になる:
/// 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
/// 2. TraceLayer: リクエストスパンに request_id を含め、全ログに自動注入
/// 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
pub fn build_router(user_state: Arc<UserState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/users", post(sign_up))
        .with_state(user_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
