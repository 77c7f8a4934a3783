use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::json;

use infomart::entities::{
    Cart, CategoryInput, LoginInput, Order, OrderStatus, Product, ProductInput, RegisterInput,
    Review, ReviewInput, ShippingMethod,
};
use infomart::format::{rupiah, tanggal};
use infomart::store::{
    page, page_count, CartStore, Catalog, Checkout, DashboardStats, ProductFilter, ReviewBoard,
};
use infomart::ApiClient;

use crate::{
    AdminCommand, CartCommand, CategoriesCommand, OrdersCommand, ProductsCommand, ReviewsCommand,
};

#[derive(Clone, Copy)]
pub(crate) struct Output {
    pub json: bool,
}

impl Output {
    /// Prints `value` as JSON in `--json` mode, otherwise runs `human`.
    fn emit<T: Serialize + ?Sized>(self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    fn message(self, message: &str) -> Result<()> {
        self.emit(&json!({ "message": message }), |_| println!("{message}"))
    }
}

pub(crate) async fn login(client: &ApiClient, out: Output, login: String, password: String) -> Result<()> {
    let token = client.login(&LoginInput { login, password }).await?;
    out.emit(&json!({ "token": token }), |_| {
        println!("Logged in.");
        println!("export INFOMART_TOKEN={token}");
    })
}

pub(crate) async fn register(
    client: &ApiClient,
    out: Output,
    username: String,
    email: String,
    password: String,
) -> Result<()> {
    let input = RegisterInput {
        username,
        email,
        password,
    };
    let message = client.register(&input).await?;
    out.message(&message)
}

pub(crate) async fn products(client: &ApiClient, out: Output, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List {
            category,
            min_price,
            max_price,
            search,
            sort,
            page: number,
        } => {
            let catalog = Catalog::load(client).await?;
            let filter = ProductFilter {
                category_id: category,
                min_price,
                max_price,
                search,
            };
            let listed = catalog.list(&filter, sort);
            let shown = page(&listed, number);
            let pages = page_count(listed.len());

            out.emit(shown, |products| {
                for product in products {
                    print_product_line(product);
                }
                println!("-- page {number} of {pages}, {} products", listed.len());
            })
        }
        ProductsCommand::Show { id } => {
            let product = client.product(id).await?;
            let reviews = client.product_reviews(id).await?;
            out.emit(&json!({ "product": product, "reviews": reviews }), |_| {
                print_product(&product);
                print_reviews(&reviews);
            })
        }
        ProductsCommand::Similar { id, limit } => {
            let (product, catalog) = tokio::try_join!(client.product(id), Catalog::load(client))?;
            let similar = catalog.similar(&product, limit);
            out.emit(&similar, |products| {
                for product in products {
                    print_product_line(product);
                }
            })
        }
    }
}

pub(crate) async fn categories(client: &ApiClient, out: Output, command: CategoriesCommand) -> Result<()> {
    match command {
        CategoriesCommand::List => {
            let categories = client.categories().await?;
            out.emit(&categories, |categories| {
                for category in categories {
                    println!(
                        "{:>4}  {} {}  ({} produk)",
                        category.id, category.icon, category.name, category.product_count
                    );
                }
            })
        }
    }
}

pub(crate) async fn cart(client: ApiClient, out: Output, command: CartCommand) -> Result<()> {
    let store = CartStore::load(client.clone()).await?;

    let cart = match command {
        CartCommand::Show => store.cart(),
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            let product = client.product(product_id).await?;
            store.add(&product, quantity).await?
        }
        CartCommand::Set { item_id, quantity } => store.set_quantity(item_id, quantity).await?,
        CartCommand::Inc { item_id } => store.increment(item_id).await?,
        CartCommand::Dec { item_id } => store.decrement(item_id).await?,
        CartCommand::Remove { item_id } => store.remove(item_id).await?,
        CartCommand::Clear => {
            store.clear().await?;
            store.cart()
        }
    };

    let summary = store.summary();
    out.emit(&json!({ "cart": cart, "summary": summary }), |_| print_cart(&cart))
}

pub(crate) async fn checkout(
    client: ApiClient,
    out: Output,
    address: Option<u64>,
    shipping: ShippingMethod,
    dry_run: bool,
) -> Result<()> {
    let mut checkout = Checkout::load(client).await?;
    if let Some(id) = address {
        checkout.select_address(id)?;
    }
    checkout.set_shipping(shipping);
    checkout.next()?;
    checkout.next()?;

    let request = checkout.request()?;
    let summary = checkout.summary();

    if !out.json {
        print_cart(checkout.cart());
        if let Some(address) = checkout.address() {
            println!("Alamat   : {} - {}", address.title(), address.one_line());
        }
        println!(
            "Kirim    : {} ({}) {}",
            shipping.name(),
            shipping.estimate(),
            rupiah(summary.shipping_cost)
        );
        println!("Bayar    : {}", checkout.payment().name());
        println!("Total    : {}", rupiah(summary.total));
    }

    if dry_run {
        return out.emit(&json!({ "request": request, "summary": summary }), |_| {});
    }

    let created = checkout.submit().await?;
    out.emit(&json!({ "message": created.message, "total": created.total }), |_| {
        println!("Pesanan berhasil dibuat! Total {}", rupiah(created.total));
    })
}

pub(crate) async fn orders(client: &ApiClient, out: Output, command: OrdersCommand) -> Result<()> {
    match command {
        OrdersCommand::List => {
            let orders = client.orders().await?;
            out.emit(&orders, |orders| print_orders(orders))
        }
        OrdersCommand::Show { id } => {
            let order = client.order(id).await?;
            out.emit(&order, print_order)
        }
    }
}

pub(crate) async fn reviews(client: &ApiClient, out: Output, command: ReviewsCommand) -> Result<()> {
    match command {
        ReviewsCommand::List { product_id } => {
            let reviews = client.product_reviews(product_id).await?;
            out.emit(&reviews, |reviews| print_reviews(reviews))
        }
        ReviewsCommand::Add {
            product_id,
            rating,
            comment,
        } => {
            let review = client
                .create_review(product_id, &ReviewInput { rating, comment })
                .await?;
            out.emit(&review, |review| {
                println!("Ulasan #{} dikirim, status {}", review.id, review.status.label());
            })
        }
    }
}

pub(crate) async fn admin(client: ApiClient, out: Output, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Stats => {
            let stats = DashboardStats::load(&client).await;
            out.emit(&stats, |stats| {
                println!("Produk   : {}", stats.products);
                println!("Kategori : {}", stats.categories);
                println!("Ulasan   : {}", stats.reviews);
            })
        }
        AdminCommand::Orders => {
            let orders = client.all_orders().await?;
            out.emit(&orders, |orders| print_orders(orders))
        }
        AdminCommand::SetStatus { id, status } => {
            let order = client.update_order_status(id, status).await?;
            out.emit(&order, print_order)
        }
        AdminCommand::ProductCreate {
            name,
            description,
            price,
            stock,
            category,
            image_url,
            inactive,
        } => {
            let input = ProductInput {
                name,
                description,
                price,
                stock_quantity: stock,
                category_id: category,
                is_active: !inactive,
                image_url,
            };
            let product = client.create_product(&input).await?;
            out.emit(&product, print_product)
        }
        AdminCommand::ProductUpdate {
            id,
            name,
            description,
            price,
            stock,
            category,
            active,
        } => {
            let current = client.product(id).await?;
            let mut input = ProductInput::from(&current);
            input.name = name.unwrap_or(input.name);
            input.description = description.unwrap_or(input.description);
            input.price = price.unwrap_or(input.price);
            input.stock_quantity = stock.unwrap_or(input.stock_quantity);
            input.category_id = category.unwrap_or(input.category_id);
            input.is_active = active.unwrap_or(input.is_active);
            if input.category_id == 0 {
                bail!("product {id} has no category, pass --category");
            }

            let product = client.update_product(id, &input).await?;
            out.emit(&product, print_product)
        }
        AdminCommand::ProductDelete { id } => {
            let message = client.delete_product(id).await?;
            out.message(&message)
        }
        AdminCommand::CategoryCreate {
            name,
            description,
            icon,
        } => {
            let category = client
                .create_category(&CategoryInput {
                    name,
                    description,
                    icon,
                })
                .await?;
            out.emit(&category, |category| {
                println!("Kategori #{} {} {} dibuat", category.id, category.icon, category.name);
            })
        }
        AdminCommand::CategoryUpdate {
            id,
            name,
            description,
            icon,
        } => {
            let current = client.category(id).await?;
            let input = CategoryInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                icon: icon.unwrap_or_default(),
            };
            let category = client.update_category(id, &input).await?;
            out.emit(&category, |category| {
                println!("Kategori #{} {} {} diperbarui", category.id, category.icon, category.name);
            })
        }
        AdminCommand::CategoryDelete { id } => {
            let message = client.delete_category(id).await?;
            out.message(&message)
        }
        AdminCommand::CategoryRecount => {
            let message = client.recount_categories().await?;
            out.message(&message)
        }
        AdminCommand::Reviews { filter } => {
            let board = ReviewBoard::load(client).await?;
            let counts = board.counts();
            let reviews = board.reviews(filter);
            out.emit(&json!({ "counts": counts, "reviews": reviews }), |_| {
                println!(
                    "Semua {} | Menunggu {} | Disetujui {} | Ditolak {}",
                    counts.all, counts.pending, counts.approved, counts.rejected
                );
                for review in &reviews {
                    println!(
                        "#{:<4} produk {:<4} {} [{}] {}",
                        review.id,
                        review.product_id,
                        review.stars(),
                        review.status.label(),
                        review.comment
                    );
                }
            })
        }
        AdminCommand::ReviewDelete { id } => {
            let message = client.admin_delete_review(id).await?;
            out.message(&message)
        }
        AdminCommand::Users => {
            let users = client.users().await?;
            out.emit(&users, |users| {
                for user in users {
                    let role = if user.admin { "admin" } else { "user" };
                    println!("{:>4}  {:<20} {:<30} {role}", user.id, user.username, user.email);
                }
            })
        }
    }
}

fn print_product_line(product: &Product) {
    let stock = if product.is_in_stock() {
        format!("stok {}", product.stock_quantity)
    } else {
        "habis".to_string()
    };
    println!("{:>4}  {:<40} {:>14}  {stock}", product.id, product.name, rupiah(product.price));
}

fn print_product(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("Harga : {}", rupiah(product.price));
    println!("Stok  : {}", product.stock_quantity);
    if let Some(category) = &product.category {
        println!("Kategori: {} {}", category.icon, category.name);
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

fn print_reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("Belum ada ulasan.");
        return;
    }
    for review in reviews {
        println!("{} {}  {}", review.stars(), review.author(), review.comment);
    }
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Keranjang Anda kosong.");
        return;
    }
    for item in &cart.items {
        println!(
            "[{:>4}] {:<40} {:>3} x {:>12} = {:>14}",
            item.id,
            item.name(),
            item.quantity,
            rupiah(item.unit_price()),
            rupiah(item.line_total())
        );
    }
    println!("Subtotal ({} barang): {}", cart.item_count(), rupiah(cart.subtotal()));
}

fn print_orders(orders: &[Order]) {
    for order in orders {
        let date = order.created_at.as_ref().map(tanggal).unwrap_or_default();
        println!(
            "#{:<5} {:<22} {:>14}  {date}",
            order.id,
            order.status.as_str(),
            rupiah(order.total)
        );
    }
}

fn print_order(order: &Order) {
    println!("Pesanan #{} - {}", order.id, order.status);
    if let Some(created_at) = &order.created_at {
        println!("Dibuat  : {}", tanggal(created_at));
    }
    if !order.address_text.is_empty() {
        println!("Alamat  : {}", order.address_text);
    }
    for item in &order.items {
        let name = item.product.as_ref().map(|p| p.name.as_str()).unwrap_or("-");
        println!(
            "  {:<40} {:>3} x {:>12}",
            name,
            item.quantity,
            rupiah(item.price)
        );
    }
    println!("Ongkir  : {}", rupiah(order.shipping_cost()));
    println!("Total   : {}", rupiah(order.total));

    if order.status == OrderStatus::Canceled {
        println!("Pesanan dibatalkan.");
    }
    for step in order.timeline() {
        let mark = if step.current {
            ">"
        } else if step.completed {
            "x"
        } else {
            " "
        };
        println!("  [{mark}] {}", step.label);
    }
    if let Some(note) = order.status.note() {
        println!("{note}");
    }
}
