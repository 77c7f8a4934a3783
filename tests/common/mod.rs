#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use infomart::{ApiClient, ClientConfig};

pub const SECRET: &str = "supersecretkey";
pub const ADMIN: (&str, &str) = ("admin", "admin123");
pub const BUDI: (&str, &str) = ("budi", "rahasia123");
pub const SARI: (&str, &str) = ("sari", "rahasia123");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub admin: bool,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Clone, Debug)]
pub struct CartLine {
    pub id: u64,
    pub user_id: u64,
    pub product_id: u64,
    pub quantity: i64,
}

/// In-memory backend state. Tests flip the `fail_*` switches to simulate a
/// misbehaving server.
#[derive(Default)]
pub struct Store {
    pub users: Vec<Value>,
    pub products: Vec<Value>,
    pub categories: Vec<Value>,
    pub cart: Vec<CartLine>,
    pub orders: Vec<Value>,
    pub reviews: Vec<Value>,
    pub requests: Vec<String>,
    pub last_order: Option<Value>,
    pub fail_cart_updates: bool,
    pub fail_cart_clear: bool,
    pub broken_counts: bool,
    next_id: u64,
}

impl Store {
    fn seeded() -> Self {
        Store {
            users: vec![
                json!({ "id": 1, "username": "admin", "email": "admin@infomart.id", "password": ADMIN.1, "admin": true, "addresses": [] }),
                json!({
                    "id": 2, "username": "budi", "email": "budi@example.com", "password": BUDI.1, "admin": false,
                    "phone": "081234567890",
                    "addresses": [
                        { "id": 1, "label": "Rumah", "street": "Jl. Merdeka No. 10", "city": "Bandung", "province": "Jawa Barat", "postal": "40111", "country": "Indonesia", "phone": "081234567890" },
                        { "id": 2, "label": "", "street": "Jl. Asia Afrika 8", "city": "Bandung", "province": "Jawa Barat", "postal": "40112", "country": "Indonesia", "phone": "081234567890" }
                    ]
                }),
                json!({ "id": 3, "username": "sari", "email": "sari@example.com", "password": SARI.1, "admin": false, "addresses": [] }),
            ],
            products: vec![
                product(1, "Kopi Arabika Gayo", 85000.0, 10, 1, true),
                product(2, "Teh Melati Premium", 25000.0, 3, 1, true),
                product(3, "Buku Tulis Sinar", 12000.0, 0, 2, true),
                product(4, "Pulpen Gel Hitam", 5000.0, 50, 2, true),
                product(5, "Kopi Robusta Lampung", 60000.0, 8, 1, false),
            ],
            categories: vec![
                json!({ "id": 1, "name": "Minuman", "description": "Kopi dan teh", "icon": "☕", "productCount": 3 }),
                json!({ "id": 2, "name": "Alat Tulis", "description": "", "products_count": 2 }),
            ],
            reviews: vec![
                json!({ "id": 1, "product_id": 1, "user_id": 2, "user": { "id": 2, "username": "budi" }, "rating": 5, "comment": "Wangi sekali", "status": "approved" }),
                json!({ "id": 2, "product_id": 1, "user_id": 3, "user": { "id": 3, "username": "sari" }, "rating": 3, "comment": "Lumayan" }),
            ],
            next_id: 100,
            ..Default::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn product(&self, id: u64) -> Option<&Value> {
        self.products.iter().find(|p| p["id"] == id)
    }

    fn user(&self, id: u64) -> Option<&Value> {
        self.users.iter().find(|u| u["id"] == id)
    }

    fn cart_json(&self, user_id: u64) -> Value {
        let items: Vec<Value> = self
            .cart
            .iter()
            .filter(|line| line.user_id == user_id)
            .map(|line| {
                json!({
                    "id": line.id,
                    "product_id": line.product_id,
                    "quantity": line.quantity,
                    "product": self.product(line.product_id).cloned().unwrap_or(Value::Null),
                })
            })
            .collect();
        json!({ "id": user_id, "user_id": user_id, "items": items })
    }
}

fn product(id: u64, name: &str, price: f64, stock: i64, category_id: u64, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} pilihan terbaik"),
        "price": price,
        "stock_quantity": stock,
        "category_id": category_id,
        "is_active": active,
        "image_url": format!("/uploads/{id}.jpg"),
    })
}

type Shared = Arc<Mutex<Store>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(Store::seeded()));

        let api = Router::new()
            .route("/register", post(register))
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/profile", get(get_profile).put(update_profile))
            .route("/profile/password", put(change_password))
            .route("/products", get(list_products).post(create_product))
            .route("/products/count", get(count_products))
            .route(
                "/products/:id",
                get(get_product).put(update_product).delete(delete_product),
            )
            .route(
                "/products/:id/reviews",
                get(product_reviews).post(create_review),
            )
            .route("/categories", get(list_categories).post(create_category))
            .route("/categories/count", get(count_categories))
            .route("/categories/recount", post(recount_categories))
            .route(
                "/categories/:id",
                get(get_category).put(update_category).delete(delete_category),
            )
            .route("/cart", get(get_cart).post(add_to_cart))
            .route("/cart/clear", delete(clear_cart))
            .route("/cart/:id", put(update_cart_item).delete(remove_cart_item))
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/:id", get(get_order))
            .route("/orders/:id/status", put(update_order_status))
            .route("/admin/orders", get(all_orders))
            .route("/reviews/count", get(count_reviews))
            .route("/reviews/:id", get(get_review).put(update_review).delete(delete_review))
            .route("/reviews/:id/admin", delete(admin_delete_review))
            .route("/users", get(list_users))
            .route("/users/:id", get(get_user).put(update_user).delete(delete_user));

        let app = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server crashed");
        });

        MockServer {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig::new(&self.base_url)).expect("Failed to build client")
    }

    pub async fn login_as(&self, (login, password): (&str, &str)) -> ApiClient {
        let client = self.client();
        client
            .login(&infomart::entities::LoginInput {
                login: login.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("Failed to log in");
        client
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn requests(&self) -> Vec<String> {
        self.with(|store| store.requests.clone())
    }

    pub fn clear_requests(&self) {
        self.with(|store| store.requests.clear());
    }

    /// Puts a line into `user_id`'s cart directly, bypassing the API.
    pub fn seed_cart(&self, user_id: u64, product_id: u64, quantity: i64) -> u64 {
        self.with(|store| {
            let id = store.next_id();
            store.cart.push(CartLine {
                id,
                user_id,
                product_id,
                quantity,
            });
            id
        })
    }
}

pub fn token_for(user_id: u64, email: &str, admin: bool, valid_for: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        user_id,
        email: email.to_string(),
        admin,
        exp: (now + valid_for).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))
        .expect("Failed to sign token")
}

async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri().path());
    state.lock().unwrap().requests.push(line);
    next.run(req).await
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    reply(status, json!({ "error": message }))
}

fn authorize(headers: &HeaderMap) -> Result<Claims, Response> {
    let token = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Authorization header required"))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| fail(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
}

fn authorize_admin(headers: &HeaderMap) -> Result<Claims, Response> {
    let claims = authorize(headers)?;
    if !claims.admin {
        return Err(fail(StatusCode::FORBIDDEN, "Admin access required"));
    }
    Ok(claims)
}

macro_rules! guard {
    ($check:expr) => {
        match $check {
            Ok(claims) => claims,
            Err(response) => return response,
        }
    };
}

//AUTH
async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = state.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default().to_string();
    if store.users.iter().any(|u| u["username"] == username.as_str()) {
        return fail(StatusCode::BAD_REQUEST, "Username already exists");
    }
    let id = store.next_id();
    store.users.push(json!({
        "id": id,
        "username": username,
        "email": body["email"],
        "password": body["password"],
        "admin": false,
        "addresses": [],
    }));
    reply(StatusCode::OK, json!({ "message": "User registered successfully" }))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let store = state.lock().unwrap();
    let user = store.users.iter().find(|u| {
        (u["username"] == body["login"] || u["email"] == body["login"])
            && u["password"] == body["password"]
    });
    let Some(user) = user else {
        return fail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };

    let token = token_for(
        user["id"].as_u64().unwrap_or_default(),
        user["email"].as_str().unwrap_or_default(),
        user["admin"].as_bool().unwrap_or_default(),
        Duration::hours(24),
    );
    reply(StatusCode::OK, json!({ "token": token }))
}

async fn logout() -> Response {
    reply(StatusCode::OK, json!({ "message": "Logged out" }))
}

//PROFILE
fn public_user(user: &Value) -> Value {
    let mut user = user.clone();
    if let Some(map) = user.as_object_mut() {
        map.remove("password");
    }
    user
}

async fn get_profile(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let claims = guard!(authorize(&headers));
    let store = state.lock().unwrap();
    match store.user(claims.user_id) {
        Some(user) => reply(StatusCode::OK, json!({ "user": public_user(user) })),
        None => fail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let Some(user) = store.users.iter_mut().find(|u| u["id"] == claims.user_id) else {
        return fail(StatusCode::NOT_FOUND, "User not found");
    };
    for key in ["username", "email", "phone"] {
        if let Some(value) = body.get(key) {
            user[key] = value.clone();
        }
    }
    reply(StatusCode::OK, json!({ "message": "Profile updated successfully" }))
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let Some(user) = store.users.iter_mut().find(|u| u["id"] == claims.user_id) else {
        return fail(StatusCode::NOT_FOUND, "User not found");
    };
    if user["password"] != body["old_password"] {
        return fail(StatusCode::BAD_REQUEST, "Old password is incorrect");
    }
    user["password"] = body["new_password"].clone();
    reply(StatusCode::OK, json!({ "message": "Password updated successfully" }))
}

//PRODUCTS
async fn list_products(State(state): State<Shared>) -> Response {
    let store = state.lock().unwrap();
    reply(StatusCode::OK, json!({ "products": store.products }))
}

async fn count_products(State(state): State<Shared>) -> Response {
    let store = state.lock().unwrap();
    if store.broken_counts {
        return reply(StatusCode::OK, json!({ "total_products": "unknown" }));
    }
    reply(StatusCode::OK, json!({ "total_products": store.products.len() }))
}

async fn get_product(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let store = state.lock().unwrap();
    match store.product(id) {
        Some(product) => reply(StatusCode::OK, json!({ "data": product })),
        None => fail(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let id = store.next_id();
    let mut product = body;
    product["id"] = json!(id);
    store.products.push(product.clone());
    reply(
        StatusCode::CREATED,
        json!({ "message": "Product created successfully", "product": product }),
    )
}

async fn update_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let Some(product) = store.products.iter_mut().find(|p| p["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Product not found");
    };
    if let (Some(target), Some(changes)) = (product.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    reply(
        StatusCode::OK,
        json!({ "message": "Product updated successfully", "product": product }),
    )
}

async fn delete_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let before = store.products.len();
    store.products.retain(|p| p["id"] != id);
    if store.products.len() == before {
        return fail(StatusCode::NOT_FOUND, "Product not found");
    }
    reply(StatusCode::OK, json!({ "message": "Product deleted successfully" }))
}

//CATEGORIES
async fn list_categories(State(state): State<Shared>) -> Response {
    let store = state.lock().unwrap();
    reply(StatusCode::OK, json!({ "categories": store.categories }))
}

async fn count_categories(State(state): State<Shared>) -> Response {
    let store = state.lock().unwrap();
    if store.broken_counts {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to count categories");
    }
    reply(StatusCode::OK, json!({ "total_categories": store.categories.len() }))
}

async fn get_category(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let store = state.lock().unwrap();
    match store.categories.iter().find(|c| c["id"] == id) {
        Some(category) => reply(StatusCode::OK, json!({ "category": category })),
        None => fail(StatusCode::NOT_FOUND, "Category not found"),
    }
}

async fn create_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let id = store.next_id();
    let category = json!({
        "id": id,
        "name": body["name"],
        "description": body["description"],
        "product_count": 0,
    });
    store.categories.push(category.clone());
    reply(
        StatusCode::CREATED,
        json!({ "message": "Category created successfully", "category": category }),
    )
}

async fn update_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let Some(category) = store.categories.iter_mut().find(|c| c["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Category not found");
    };
    category["name"] = body["name"].clone();
    category["description"] = body["description"].clone();
    reply(
        StatusCode::OK,
        json!({ "message": "Category updated successfully", "category": category }),
    )
}

async fn delete_category(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    store.categories.retain(|c| c["id"] != id);
    reply(StatusCode::OK, json!({ "message": "Category deleted successfully" }))
}

async fn recount_categories(State(state): State<Shared>, headers: HeaderMap) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let counts: Vec<(Value, usize)> = store
        .categories
        .iter()
        .map(|c| {
            let count = store
                .products
                .iter()
                .filter(|p| p["category_id"] == c["id"])
                .count();
            (c["id"].clone(), count)
        })
        .collect();
    for (id, count) in counts {
        let category = store.categories.iter_mut().find(|c| c["id"] == id);
        if let Some(map) = category.and_then(Value::as_object_mut) {
            map.remove("productCount");
            map.remove("products_count");
            map.insert("product_count".to_string(), json!(count));
        }
    }
    reply(StatusCode::OK, json!({ "message": "Recount completed" }))
}

//CART
async fn get_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let claims = guard!(authorize(&headers));
    let store = state.lock().unwrap();
    reply(StatusCode::OK, json!({ "cart": store.cart_json(claims.user_id) }))
}

async fn add_to_cart(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let product_id = body["product_id"].as_u64().unwrap_or_default();
    let quantity = body["quantity"].as_i64().unwrap_or_default();

    let Some(stock) = store.product(product_id).map(|p| p["stock_quantity"].as_i64().unwrap_or_default()) else {
        return fail(StatusCode::NOT_FOUND, "Product not found");
    };

    let existing = store
        .cart
        .iter()
        .position(|l| l.user_id == claims.user_id && l.product_id == product_id);
    let in_cart = existing.map(|i| store.cart[i].quantity).unwrap_or_default();
    if in_cart + quantity > stock {
        return fail(StatusCode::BAD_REQUEST, "Insufficient stock");
    }

    match existing {
        Some(index) => store.cart[index].quantity += quantity,
        None => {
            let id = store.next_id();
            store.cart.push(CartLine {
                id,
                user_id: claims.user_id,
                product_id,
                quantity,
            });
        }
    }
    let cart = store.cart_json(claims.user_id);
    reply(
        StatusCode::OK,
        json!({ "message": "Product added to cart successfully", "cart": cart }),
    )
}

async fn update_cart_item(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    if store.fail_cart_updates {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update cart item");
    }

    let quantity = body["quantity"].as_i64().unwrap_or_default();
    let Some(index) = store
        .cart
        .iter()
        .position(|l| l.id == id && l.user_id == claims.user_id)
    else {
        return fail(StatusCode::NOT_FOUND, "Cart item not found");
    };
    let stock = store
        .product(store.cart[index].product_id)
        .and_then(|p| p["stock_quantity"].as_i64())
        .unwrap_or_default();
    if quantity > stock {
        return fail(StatusCode::BAD_REQUEST, "Insufficient stock");
    }

    store.cart[index].quantity = quantity;
    reply(
        StatusCode::OK,
        json!({ "message": "Cart item updated successfully", "item": { "id": id, "quantity": quantity } }),
    )
}

async fn remove_cart_item(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let before = store.cart.len();
    store
        .cart
        .retain(|l| !(l.id == id && l.user_id == claims.user_id));
    if store.cart.len() == before {
        return fail(StatusCode::NOT_FOUND, "Cart item not found");
    }
    reply(StatusCode::OK, json!({ "message": "Item removed from cart" }))
}

async fn clear_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    if store.fail_cart_clear {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear cart");
    }
    store.cart.retain(|l| l.user_id != claims.user_id);
    reply(StatusCode::OK, json!({ "message": "Cart cleared" }))
}

//ORDERS
async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    store.last_order = Some(body.clone());

    let lines: Vec<CartLine> = store
        .cart
        .iter()
        .filter(|l| l.user_id == claims.user_id)
        .cloned()
        .collect();
    if lines.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Cart is empty");
    }

    let address = store.user(claims.user_id).and_then(|u| {
        u["addresses"]
            .as_array()
            .and_then(|list| list.iter().find(|a| a["id"] == body["address_id"]))
            .cloned()
    });
    let Some(address) = address else {
        return fail(StatusCode::BAD_REQUEST, "Address not found");
    };

    let mut items = Vec::new();
    let mut items_total = 0.0;
    for line in &lines {
        let Some(product) = store.product(line.product_id).cloned() else {
            continue;
        };
        let price = product["price"].as_f64().unwrap_or_default();
        items_total += price * line.quantity as f64;
        items.push(json!({
            "product_id": line.product_id,
            "product": product,
            "price": price,
            "quantity": line.quantity,
        }));
    }
    let total = items_total + body["shipping_cost"].as_f64().unwrap_or_default();

    let id = store.next_id();
    store.orders.push(json!({
        "id": id,
        "user_id": claims.user_id,
        "status": "Menunggu Pembayaran",
        "total": total,
        "address_text": format!("{}, {}", address["street"].as_str().unwrap_or_default(), address["city"].as_str().unwrap_or_default()),
        "items": items,
        "created_at": Utc::now().to_rfc3339(),
    }));

    reply(
        StatusCode::CREATED,
        json!({ "message": "Order created successfully", "total": total }),
    )
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let claims = guard!(authorize(&headers));
    let store = state.lock().unwrap();
    let orders: Vec<&Value> = store
        .orders
        .iter()
        .filter(|o| o["user_id"] == claims.user_id)
        .collect();
    reply(StatusCode::OK, json!({ "orders": orders }))
}

async fn get_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let store = state.lock().unwrap();
    match store
        .orders
        .iter()
        .find(|o| o["id"] == id && (claims.admin || o["user_id"] == claims.user_id))
    {
        Some(order) => reply(StatusCode::OK, json!({ "order": order })),
        None => fail(StatusCode::NOT_FOUND, "Order not found"),
    }
}

async fn all_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    guard!(authorize_admin(&headers));
    let store = state.lock().unwrap();
    reply(StatusCode::OK, json!({ "orders": store.orders }))
}

async fn update_order_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let valid = ["Menunggu Pembayaran", "Diproses", "Dikirim", "Selesai", "Dibatalkan"];
    let Some(status) = body["status"].as_str().filter(|s| valid.contains(s)) else {
        return fail(StatusCode::BAD_REQUEST, "Invalid status");
    };

    let mut store = state.lock().unwrap();
    let Some(order) = store.orders.iter_mut().find(|o| o["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    order["status"] = json!(status);
    reply(
        StatusCode::OK,
        json!({ "message": "Order status updated successfully", "order": order }),
    )
}

//REVIEWS
async fn count_reviews(State(state): State<Shared>) -> Response {
    let store = state.lock().unwrap();
    if store.broken_counts {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Failed to count reviews");
    }
    reply(StatusCode::OK, json!({ "total_reviews": store.reviews.len() }))
}

async fn get_review(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let store = state.lock().unwrap();
    match store.reviews.iter().find(|r| r["id"] == id) {
        Some(review) => reply(StatusCode::OK, review.clone()),
        None => fail(StatusCode::NOT_FOUND, "Review not found"),
    }
}

async fn product_reviews(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let store = state.lock().unwrap();
    let reviews: Vec<&Value> = store
        .reviews
        .iter()
        .filter(|r| r["product_id"] == id)
        .collect();
    reply(StatusCode::OK, json!(reviews))
}

async fn create_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(product_id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    if store.product(product_id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Product not found");
    }
    let id = store.next_id();
    let review = json!({
        "id": id,
        "product_id": product_id,
        "user_id": claims.user_id,
        "rating": body["rating"],
        "comment": body["comment"],
        "status": "pending",
        "created_at": Utc::now().to_rfc3339(),
    });
    store.reviews.push(review.clone());
    reply(StatusCode::CREATED, review)
}

async fn update_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let Some(review) = store.reviews.iter_mut().find(|r| r["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Review not found");
    };
    if review["user_id"] != claims.user_id {
        return fail(StatusCode::FORBIDDEN, "You can only edit your own review");
    }
    review["rating"] = body["rating"].clone();
    review["comment"] = body["comment"].clone();
    reply(StatusCode::OK, review.clone())
}

async fn delete_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let claims = guard!(authorize(&headers));
    let mut store = state.lock().unwrap();
    let Some(review) = store.reviews.iter().find(|r| r["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "Review not found");
    };
    if review["user_id"] != claims.user_id {
        return fail(StatusCode::FORBIDDEN, "You can only delete your own review");
    }
    store.reviews.retain(|r| r["id"] != id);
    reply(StatusCode::OK, json!({ "message": "Review deleted successfully" }))
}

async fn admin_delete_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let before = store.reviews.len();
    store.reviews.retain(|r| r["id"] != id);
    if store.reviews.len() == before {
        return fail(StatusCode::NOT_FOUND, "Review not found");
    }
    reply(StatusCode::OK, json!({ "message": "Review deleted successfully" }))
}

//USERS
async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    guard!(authorize_admin(&headers));
    let store = state.lock().unwrap();
    let users: Vec<Value> = store.users.iter().map(public_user).collect();
    reply(StatusCode::OK, json!({ "users": users }))
}

async fn get_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    guard!(authorize(&headers));
    let store = state.lock().unwrap();
    match store.user(id) {
        Some(user) => reply(
            StatusCode::OK,
            json!({
                "id": user["id"],
                "username": user["username"],
                "email": user["email"],
                "admin": user["admin"],
            }),
        ),
        None => fail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let Some(user) = store.users.iter_mut().find(|u| u["id"] == id) else {
        return fail(StatusCode::NOT_FOUND, "User not found");
    };
    for key in ["username", "email", "admin"] {
        if let Some(value) = body.get(key) {
            user[key] = value.clone();
        }
    }
    reply(StatusCode::OK, json!({ "message": "User updated successfully" }))
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    guard!(authorize_admin(&headers));
    let mut store = state.lock().unwrap();
    let Some(user) = store.user(id) else {
        return fail(StatusCode::NOT_FOUND, "User not found");
    };
    if user["admin"] == true {
        return fail(StatusCode::FORBIDDEN, "Cannot delete admin account");
    }
    store.users.retain(|u| u["id"] != id);
    reply(StatusCode::OK, json!({ "message": "User deleted successfully" }))
}
