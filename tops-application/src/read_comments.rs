use super::*;

pub fn read_comments(
    connections: &sqlite::Connections,
    user: &CurrentUser,
    params: Params,
) -> Result<Vec<DeliveryServiceRequestComment>> {
    connections.shared()?.transaction(|tx| {
        let info = ApiInfo::new(user.clone(), params, tx);
        let resource = CommentResource::new(&info);
        handlers::read_handler(&resource)
    })
}
