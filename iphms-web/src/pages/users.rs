use shared::{
    models::{Notice, User, format_date},
    state::{Paginator, users::delete_user},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::Services,
    components::{alert::Alert, loading::Loading, pagination::Pagination},
    hooks::{Fetch, use_users},
};

const PAGE_SIZE: usize = 10;

fn confirm_delete(user: &User) -> bool {
    web_sys::window()
        .and_then(|window| {
            window
                .confirm_with_message(&format!("Delete {} <{}>?", user.name, user.email))
                .ok()
        })
        .unwrap_or(false)
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let users = use_users();
    let paginator = use_state(|| Paginator::new(PAGE_SIZE, 0));
    let notice = use_state(|| None::<Notice>);

    let on_delete = {
        let users = users.clone();
        let notice = notice.clone();
        Callback::from(move |user: User| {
            let Fetch::Ready(list) = &*users else {
                return;
            };
            if !confirm_delete(&user) {
                return;
            }
            let mut list = list.clone();
            let (users, notice) = (users.clone(), notice.clone());
            spawn_local(async move {
                let services = Services::shared();
                let outcome = delete_user(&services.users, &mut list, user.id).await;
                notice.set(Some(outcome.unwrap_or_else(|failure| failure)));
                users.set(Fetch::Ready(list));
            });
        })
    };

    let content = match &*users {
        Fetch::Loading => html! { <Loading /> },
        Fetch::Failed(message) => html! {
            <div class="alert alert-error"><span>{ message.clone() }</span></div>
        },
        Fetch::Ready(list) => {
            let mut pager = *paginator;
            pager.set_total_items(list.len());
            let on_page = {
                let paginator = paginator.clone();
                Callback::from(move |page: usize| {
                    let mut next = pager;
                    next.go_to(page);
                    paginator.set(next);
                })
            };
            let rows = pager.items(list).iter().map(|user| {
                let on_delete = on_delete.clone();
                let target = user.clone();
                html! {
                    <tr key={user.id.to_string()}>
                        <td>{ user.id.to_string() }</td>
                        <td>{ user.name.clone() }</td>
                        <td>{ user.email.clone() }</td>
                        <td>
                            <span class={classes!("badge", user.is_admin().then_some("badge-primary"))}>
                                { user.role.to_string() }
                            </span>
                        </td>
                        <td>{ user.device_id.clone() }</td>
                        <td>{ format_date(user.created_at.as_ref(), false) }</td>
                        <td>
                            <button
                                class="btn btn-error btn-xs"
                                onclick={Callback::from(move |_| on_delete.emit(target.clone()))}
                            >
                                {"Delete"}
                            </button>
                        </td>
                    </tr>
                }
            });

            html! {
                <>
                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>{"ID"}</th>
                                    <th>{"Name"}</th>
                                    <th>{"Email"}</th>
                                    <th>{"Role"}</th>
                                    <th>{"Device"}</th>
                                    <th>{"Created"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{ for rows }</tbody>
                        </table>
                    </div>
                    <Pagination info={pager.info()} pages={pager.page_numbers()} {on_page} />
                </>
            }
        }
    };

    let on_close = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{"Users"}</h1>
            if let Some(notice) = (*notice).clone() {
                <Alert {notice} on_close={Some(on_close)} />
            }
            { content }
        </div>
    }
}
