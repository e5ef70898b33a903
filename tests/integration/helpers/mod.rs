// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HEALTHY_HOMEPAGE: &str = r#"<!DOCTYPE html><html><head>
<meta name="description" content="OTKA - produse resigilate">
<script type="application/ld+json">{"@type":"Organization"}</script>
</head><body><h2>Produse resigilate și expuse</h2></body></html>"#;

/// 挂载一个返回 HTML 的 GET 路由
pub async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// 挂载一个重定向路由
pub async fn mount_redirect(server: &MockServer, route: &str, status: u16, location: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).insert_header("Location", location))
        .mount(server)
        .await;
}

/// 启动一个所有检查都应通过的模拟站点
pub async fn healthy_site() -> MockServer {
    let server = MockServer::start().await;

    mount_page(&server, "/", 200, HEALTHY_HOMEPAGE).await;
    mount_page(&server, "/parteneri", 200, "<h1>Parteneri OTKA</h1>").await;
    mount_redirect(&server, "/admin", 307, "/login?redirect=/admin").await;
    mount_page(
        &server,
        "/parteneri/dashboard",
        200,
        "<p>Trebuie să vă autentificați pentru a continua</p>",
    )
    .await;
    mount_page(&server, "/cart", 200, "<h1>Coș de cumpărături</h1>").await;
    for link in ["/termeni", "/gdpr", "/cookies", "/contact"] {
        mount_page(&server, link, 200, "<footer>OTKA</footer>").await;
    }
    mount_page(&server, "/login", 200, "<form>Login</form>").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/commission-summary/export"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    server
}
