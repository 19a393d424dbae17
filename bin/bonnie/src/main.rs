use bonnie::{discover_fans, perform_action, prepare_state, FanKind, Result, Storage, Topic};

use std::collections::HashMap;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::StreamExt;
use log::{error, info, warn};
use paho_mqtt as mqtt;
use tokio::sync::Mutex;
use tokio::task;
use tokio::time::{self, interval};

type Fans = Arc<Mutex<HashMap<String, FanKind>>>;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let bond_host = std::env::var("BOND_HOST").expect("set ENV variable BOND_HOST");
    let bond = bond::Client::new(&bond_host);

    let fans = discover_fans(&bond).await?;
    info!("discovered {} fans", fans.len());

    let fans: Fans = Arc::from(Mutex::from(fans));

    let mqtt_address = std::env::var("MQTT_ADDRESS").expect("set ENV variable MQTT_ADDRESS");
    let mqtt_client = connect_mqtt(mqtt_address).await?;
    info!("connected mqtt");

    let bpup = bond::BpupClient::connect(&bond_host).await?;
    info!("subscribed to push updates from {}", bond_host);

    let storage = Arc::new(Mutex::new(Storage::new()));

    let (action_handle, push_handle, poll_handle) = tokio::try_join!(
        task::spawn(subscribe_actions(mqtt_client.clone(), fans.clone())),
        task::spawn(subscribe_push(
            mqtt_client.clone(),
            bpup,
            fans.clone(),
            storage.clone()
        )),
        task::spawn(poll_state(mqtt_client, bond, fans, storage))
    )?;

    action_handle?;
    push_handle?;
    poll_handle?;

    Ok(())
}

async fn connect_mqtt(address: String) -> Result<mqtt::AsyncClient> {
    let client = mqtt::AsyncClient::new(address).unwrap_or_else(|err| {
        error!("Error creating the client: {}", err);
        process::exit(1);
    });

    let conn_opts = mqtt::ConnectOptionsBuilder::new_v3()
        .keep_alive_interval(Duration::from_secs(30))
        .clean_session(false)
        .finalize();

    client.connect(conn_opts).await?;

    Ok(client)
}

async fn subscribe_actions(mut mqtt: mqtt::AsyncClient, fans: Fans) -> Result<()> {
    let mut stream = mqtt.get_stream(None);

    mqtt.subscribe_many(&[Topic::Action.to_string()], &[mqtt::QOS_1]);

    info!("Subscribed to topic: {}", Topic::Action);

    while let Some(msg_opt) = stream.next().await {
        if let Some(msg) = msg_opt {
            let fans = fans.lock().await;

            match perform_action(msg.payload(), &fans).await {
                Ok(_) => (),
                Err(err) => error!("Error performing action: {}", err),
            }
        } else {
            error!("Lost MQTT connection. Attempting reconnect.");
            while let Err(err) = mqtt.reconnect().await {
                error!("Error MQTT reconnecting: {}", err);
                time::sleep(Duration::from_millis(1000)).await;
            }
        }
    }

    Ok(())
}

/// Consumes push updates over UDP. The bridge drops the session 60
/// seconds after our last datagram, so a keep-alive goes out every 55.
async fn subscribe_push(
    mqtt: mqtt::AsyncClient,
    bpup: bond::BpupClient,
    fans: Fans,
    storage: Arc<Mutex<Storage>>,
) -> Result<()> {
    let mut timer = interval(Duration::from_secs(55));

    loop {
        tokio::select! {
            _ = timer.tick() => {
                bpup.keep_alive().await?;
            }
            message = bpup.read() => {
                let message = message?;

                let Some((device_id, state)) = message.device_state() else {
                    continue;
                };

                let mut fans = fans.lock().await;
                let Some(fan) = fans.get_mut(&device_id) else {
                    continue;
                };

                if let Err(err) = fan.apply_state(&state) {
                    warn!("ignoring push update for {}: {}", device_id, err);
                    continue;
                }

                publish_state(&mqtt, &storage, prepare_state(fan)).await?;
            }
        }
    }
}

/// Periodic full-state poll. Covers updates the push channel missed,
/// deduplicated against it through the shared storage.
async fn poll_state(
    mqtt: mqtt::AsyncClient,
    bond: bond::Client,
    fans: Fans,
    storage: Arc<Mutex<Storage>>,
) -> Result<()> {
    let mut timer = interval(Duration::from_secs(30));

    loop {
        timer.tick().await;
        let mut fans = fans.lock().await;

        for fan in fans.values_mut() {
            let state = match bond.state(fan.id()).await {
                Ok(state) => state,
                Err(err) => {
                    error!("Error requesting state for {}: {}", fan.id(), err);
                    continue;
                }
            };

            if let Err(err) = fan.apply_state(&state) {
                warn!("ignoring polled state for {}: {}", fan.id(), err);
                continue;
            }

            publish_state(&mqtt, &storage, prepare_state(fan)).await?;
        }
    }
}

async fn publish_state(
    mqtt: &mqtt::AsyncClient,
    storage: &Mutex<Storage>,
    state: bonnie::StatePayload,
) -> Result<()> {
    if !storage.lock().await.apply_state(&state) {
        return Ok(());
    }

    info!("publishing state: {:?}", state);

    let topic = Topic::State(state.device_id.clone());
    let payload = serde_json::to_vec(&state)?;

    let message = mqtt::MessageBuilder::new()
        .topic(topic.to_string())
        .payload(payload)
        .finalize();

    mqtt.publish(message).await?;

    Ok(())
}
