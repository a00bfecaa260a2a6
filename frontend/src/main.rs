use expense_viewer_frontend::api::{HttpAuthGateway, HttpExpenseSource};
use expense_viewer_frontend::format::{
    category_color, category_icon, expense_count_label, format_currency, format_total,
};
use expense_viewer_frontend::view::{
    aggregate_by_category, aggregate_total, distinct_categories, ALL_CATEGORIES,
};
use expense_viewer_frontend::{
    compute_view, load_expenses, AppConfig, AuthStatus, ExpenseRecord, LocalStorage, Origin,
    SessionState, SortField, ViewQuery, ViewStatus,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let auth_status = use_state(|| AuthStatus::Checking);
    let config = use_state(AppConfig::from_build_env);

    {
        let auth_status = auth_status.clone();
        use_effect_with_deps(
            move |_| {
                let session = SessionState::initialize(LocalStorage);
                auth_status.set(session.status());
                || ()
            },
            (),
        );
    }

    if *auth_status == AuthStatus::Checking {
        return html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Loading Expense Tracker..."}
            </div>
        };
    }

    let on_authenticated = {
        let auth_status = auth_status.clone();
        Callback::from(move |_| auth_status.set(AuthStatus::Authenticated))
    };

    let on_logout = {
        let auth_status = auth_status.clone();
        Callback::from(move |_| {
            SessionState::initialize(LocalStorage).logout();
            auth_status.set(AuthStatus::Unauthenticated);
        })
    };

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            if *auth_status == AuthStatus::Authenticated {
                <ExpensePage on_logout={on_logout} />
            } else {
                <LoginScreen on_authenticated={on_authenticated} />
            }
        </ContextProvider<AppConfig>>
    }
}

#[derive(Properties, PartialEq)]
struct LoginScreenProps {
    on_authenticated: Callback<()>,
}

#[function_component(LoginScreen)]
fn login_screen(props: &LoginScreenProps) -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username_val = (*username).clone();
            let password_val = (*password).clone();

            if username_val.is_empty() || password_val.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let gateway = HttpAuthGateway::new(&config);
            let on_authenticated = on_authenticated.clone();
            let error_async = error.clone();
            let loading_async = loading.clone();
            spawn_local(async move {
                let mut session = SessionState::initialize(LocalStorage);
                match session.login(&gateway, &username_val, &password_val).await {
                    Ok(()) => on_authenticated.emit(()),
                    Err(e) => error_async.set(Some(e.to_string())),
                }
                loading_async.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"🔐 Login"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Access your expense tracker"}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ format!("⚠️ {}", msg) }</div>
                    }

                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground" for="username">{"Username"}</label>
                        <input
                            id="username"
                            type="text"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground"
                            value={(*username).clone()}
                            disabled={*loading}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground" for="password">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground"
                            value={(*password).clone()}
                            disabled={*loading}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold"
                        disabled={*loading}
                    >
                        { if *loading { "Signing in..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpensePageProps {
    on_logout: Callback<()>,
}

#[function_component(ExpensePage)]
fn expense_page(props: &ExpensePageProps) -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let original = use_state(Vec::<ExpenseRecord>::new);
    let origin = use_state(|| None::<Origin>);
    let loading = use_state(|| true);
    let query = use_state(ViewQuery::default);
    let show_breakdown = use_state(|| false);

    {
        let original = original.clone();
        let origin = origin.clone();
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let source = HttpExpenseSource::new(config);
                    let outcome = load_expenses(&source).await;
                    original.set(outcome.records);
                    origin.set(Some(outcome.origin));
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let displayed = compute_view(&original, &query);
    let total = aggregate_total(&displayed);
    let categories = distinct_categories(&original);
    let status = ViewStatus::resolve(*loading, original.len(), displayed.len());

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            query.set(ViewQuery {
                search: input.value(),
                ..(*query).clone()
            });
        })
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    let toggle_breakdown = {
        let show_breakdown = show_breakdown.clone();
        Callback::from(move |_| show_breakdown.set(!*show_breakdown))
    };

    let category_chip = |category: &String| {
        let is_active = *category == query.category;
        let class_name = if is_active {
            "px-4 py-2 rounded-full text-[13px] font-medium text-white whitespace-nowrap"
        } else {
            "px-4 py-2 rounded-full text-[13px] font-medium bg-secondary text-secondary-foreground whitespace-nowrap"
        };
        let style = if is_active {
            format!("background-color: {}", category_color(category))
        } else {
            String::new()
        };
        let label = if category == ALL_CATEGORIES {
            category.clone()
        } else {
            format!("{} {}", category_icon(category), category)
        };
        let onclick = {
            let query = query.clone();
            let category = category.clone();
            Callback::from(move |_| {
                query.set(ViewQuery {
                    category: category.clone(),
                    ..(*query).clone()
                })
            })
        };
        html! {
            <button type="button" class={class_name} style={style} onclick={onclick}>{ label }</button>
        }
    };

    let sort_header = |field: SortField| {
        let onclick = {
            let query = query.clone();
            Callback::from(move |_| {
                query.set(ViewQuery {
                    sort: query.sort.toggle(field),
                    ..(*query).clone()
                })
            })
        };
        html! {
            <th class="px-8 py-4 font-bold cursor-pointer select-none" onclick={onclick}>
                { format!("{} {}", field.label(), query.sort.indicator(field)) }
            </th>
        }
    };

    html! {
        <div class="min-h-screen bg-background p-6">
            <div class="max-w-[1200px] mx-auto bg-card rounded-2xl shadow-md border border-border overflow-hidden">
                <div class="flex items-center justify-between p-6 border-b border-border">
                    <div>
                        <h1 class="text-2xl font-bold text-foreground">{"💰 Expense Tracker"}</h1>
                        <p class="text-sm text-muted-foreground">{"Track your expenses from Notion"}</p>
                    </div>
                    <button onclick={on_logout} class="flex items-center gap-2 px-4 py-2 rounded-full bg-secondary text-[13px] font-medium">
                        { icon_log_out() }
                        <span>{"Logout"}</span>
                    </button>
                </div>

                <div class="flex flex-col md:flex-row gap-4 items-stretch md:items-center justify-between px-6 py-4 bg-muted">
                    <input
                        type="text"
                        placeholder="🔍 Search expenses..."
                        class="w-full md:max-w-[300px] px-4 py-2 rounded-[10px] border border-border"
                        value={query.search.clone()}
                        oninput={on_search}
                    />
                    <div class="bg-[#28a745] text-white px-6 py-3 rounded-[10px] text-center">
                        <div class="text-xl font-bold">{ format_currency(total) }</div>
                        <div class="text-[11px] uppercase tracking-widest">
                            { format!("{} of {} expenses", displayed.len(), original.len()) }
                        </div>
                    </div>
                </div>

                <div class="flex gap-2 overflow-x-auto px-6 py-3">
                    { for categories.iter().map(category_chip) }
                </div>

                if *origin == Some(Origin::Fallback) {
                    <p class="px-6 text-sm text-muted-foreground">{"Showing offline data; live expenses could not be loaded."}</p>
                }

                <button onclick={toggle_breakdown} class="mx-6 mt-4 flex items-center gap-2 px-5 py-3 rounded-[10px] bg-[#6f42c1] text-white text-sm font-medium">
                    { icon_bar_chart() }
                    { if *show_breakdown { "Hide Category Breakdown" } else { "Show Category Breakdown" } }
                </button>

                if *show_breakdown {
                    { category_breakdown(&original) }
                }

                <div class="overflow-x-auto p-6">
                    {
                        if let Some(message) = status.message() {
                            html! { <p class="py-12 text-center text-muted-foreground">{ format!("📋 {}", message) }</p> }
                        } else {
                            html! {
                                <table class="w-full text-left border-collapse">
                                    <thead>
                                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                            { for SortField::ALL.into_iter().map(sort_header) }
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        { for displayed.iter().enumerate().map(|(idx, item)| expense_row(idx, item)) }
                                        <tr class="bg-[#28a745] text-white font-bold">
                                            <td class="px-8 py-4">{"🎯 TOTAL"}</td>
                                            <td class="px-8 py-4">{"—"}</td>
                                            <td class="px-8 py-4">{ format_currency(total) }</td>
                                            <td class="px-8 py-4">{ expense_count_label(displayed.len()) }</td>
                                        </tr>
                                    </tbody>
                                </table>
                            }
                        }
                    }
                </div>
            </div>
        </div>
    }
}

fn expense_row(idx: usize, item: &ExpenseRecord) -> Html {
    html! {
        <tr key={idx} class={if idx % 2 == 0 { "text-sm bg-muted/40" } else { "text-sm" }}>
            <td class="px-8 py-4 text-foreground">{ format!("{} {}", category_icon(&item.category), item.expense) }</td>
            <td class="px-8 py-4">
                <span class="px-3 py-1 rounded-full text-[10px] font-bold text-white" style={format!("background-color: {}", category_color(&item.category))}>
                    { item.category.clone() }
                </span>
            </td>
            <td class="px-8 py-4 font-semibold text-[#e74c3c]">{ format_currency(item.amount) }</td>
            <td class="px-8 py-4 text-muted-foreground">{ item.date.clone() }</td>
        </tr>
    }
}

fn category_breakdown(records: &[ExpenseRecord]) -> Html {
    let breakdown = aggregate_by_category(records);
    html! {
        <div class="px-6 py-4">
            <h3 class="font-bold text-lg text-foreground mb-4">{"💰 Spending Breakdown by Category"}</h3>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                { for breakdown.iter().map(|(category, totals)| html! {
                    <div key={category.clone()} class="p-4 rounded-xl text-white text-center" style={format!("background-color: {}", category_color(category))}>
                        <div class="text-2xl mb-2">{ category_icon(category) }</div>
                        <div class="font-semibold mb-2">{ category.clone() }</div>
                        <div class="text-lg font-bold">{ format!("₹{}", format_total(totals.total)) }</div>
                        <div class="text-sm opacity-90">{ expense_count_label(totals.count) }</div>
                    </div>
                }) }
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    yew::Renderer::<App>::new().render();
}
